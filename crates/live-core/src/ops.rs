#![forbid(unsafe_code)]

//! Operator algebra: cells combined into new cells.
//!
//! Every operator returns a **new** composite cell that owns shared handles
//! to its operands and re-reads them on each evaluation. Operands are never
//! mutated. The composite's mode is the
//! [combination](crate::EvaluationMode::combine)
//! of its operands' modes, so a frozen operand yields a frozen composite
//! evaluated once, at construction.
//!
//! | family   | operators                                          | result      |
//! |----------|----------------------------------------------------|-------------|
//! | boolean  | `eq_live` `ne_live` `and` (`&`) `or` (`\|`) `negate` (`!`) | `Live<bool>` |
//! | numeric  | `eq_live` `ne_live` `lt` `le` `gt` `ge`            | `Live<bool>` |
//! | numeric  | `+` `-` `*` `/` `min_with` `max_with` unary `-`    | same type   |
//! | any      | [`select_if`] over [`pair_operands`]               | branch type |
//!
//! Integer division by zero is not guarded at construction; it surfaces at
//! read time as [`EvalError::DivisionByZero`](crate::EvalError).

use std::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Not, Sub};

use crate::cell::Live;
use crate::node::{Binary, Logic, Select, ShortCircuit, Unary};
use crate::scalar::{Numeric, Scalar};

// ---------------------------------------------------------------------------
// Branch pairs and selection
// ---------------------------------------------------------------------------

/// An ordered `(when_true, when_false)` pair of cells, consumed by
/// [`select_if`].
pub struct Branches<T> {
    when_true: Live<T>,
    when_false: Live<T>,
}

impl<T> Clone for Branches<T> {
    fn clone(&self) -> Self {
        Self {
            when_true: self.when_true.clone(),
            when_false: self.when_false.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Branches<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Branches")
            .field("when_true", &self.when_true)
            .field("when_false", &self.when_false)
            .finish()
    }
}

impl<T> Branches<T> {
    #[must_use]
    pub fn when_true(&self) -> &Live<T> {
        &self.when_true
    }

    #[must_use]
    pub fn when_false(&self) -> &Live<T> {
        &self.when_false
    }
}

/// Group two cells for [`select_if`].
pub fn pair_operands<T>(when_true: &Live<T>, when_false: &Live<T>) -> Branches<T> {
    Branches {
        when_true: when_true.clone(),
        when_false: when_false.clone(),
    }
}

/// A cell reading `condition`, then only the chosen branch.
///
/// The untaken branch is not evaluated for that read.
pub fn select_if<T: Scalar>(condition: &Live<bool>, branches: Branches<T>) -> Live<T> {
    let mode = condition
        .mode()
        .combine(branches.when_true.mode())
        .combine(branches.when_false.mode());
    Live::derive(
        mode,
        Select {
            condition: condition.clone(),
            branches,
        },
    )
}

fn binary<A: Scalar, B: Scalar, T: Scalar>(
    lhs: &Live<A>,
    rhs: &Live<B>,
    op: fn(A, B) -> crate::Result<T>,
) -> Live<T> {
    Live::derive(
        lhs.mode().combine(rhs.mode()),
        Binary {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            op,
        },
    )
}

pub(crate) fn unary<A: Scalar, T: Scalar>(
    operand: &Live<A>,
    op: fn(A) -> crate::Result<T>,
) -> Live<T> {
    Live::derive(
        operand.mode(),
        Unary {
            operand: operand.clone(),
            op,
        },
    )
}

// ---------------------------------------------------------------------------
// Any scalar
// ---------------------------------------------------------------------------

impl<T: Scalar> Live<T> {
    /// `self == rhs`, re-evaluated on every read.
    pub fn eq_live(&self, rhs: &Live<T>) -> Live<bool> {
        binary(self, rhs, |a: T, b: T| Ok(a == b))
    }

    /// `self != rhs`, re-evaluated on every read.
    pub fn ne_live(&self, rhs: &Live<T>) -> Live<bool> {
        binary(self, rhs, |a: T, b: T| Ok(a != b))
    }
}

// ---------------------------------------------------------------------------
// Boolean
// ---------------------------------------------------------------------------

impl Live<bool> {
    /// Short-circuit AND: `rhs` is only read when `self` is true.
    pub fn and(&self, rhs: &Live<bool>) -> Live<bool> {
        self.logic(rhs, Logic::And)
    }

    /// Short-circuit OR: `rhs` is only read when `self` is false.
    pub fn or(&self, rhs: &Live<bool>) -> Live<bool> {
        self.logic(rhs, Logic::Or)
    }

    fn logic(&self, rhs: &Live<bool>, logic: Logic) -> Live<bool> {
        Live::derive(
            self.mode().combine(rhs.mode()),
            ShortCircuit {
                lhs: self.clone(),
                rhs: rhs.clone(),
                logic,
            },
        )
    }

    /// Logical NOT. Same as `!&cell`; borrows where `Not::not` would
    /// consume.
    pub fn negate(&self) -> Live<bool> {
        unary(self, |v: bool| Ok(!v))
    }

    /// Method form of [`select_if`].
    pub fn select<T: Scalar>(&self, branches: Branches<T>) -> Live<T> {
        select_if(self, branches)
    }
}

// ---------------------------------------------------------------------------
// Numeric
// ---------------------------------------------------------------------------

impl<T: Numeric> Live<T> {
    pub fn lt(&self, rhs: &Live<T>) -> Live<bool> {
        binary(self, rhs, |a: T, b: T| Ok(a < b))
    }

    pub fn le(&self, rhs: &Live<T>) -> Live<bool> {
        binary(self, rhs, |a: T, b: T| Ok(a <= b))
    }

    pub fn gt(&self, rhs: &Live<T>) -> Live<bool> {
        binary(self, rhs, |a: T, b: T| Ok(a > b))
    }

    pub fn ge(&self, rhs: &Live<T>) -> Live<bool> {
        binary(self, rhs, |a: T, b: T| Ok(a >= b))
    }

    /// The smaller operand on every read.
    pub fn min_with(&self, rhs: &Live<T>) -> Live<T> {
        binary(self, rhs, |a: T, b: T| Ok(a.min_with(b)))
    }

    /// The larger operand on every read.
    pub fn max_with(&self, rhs: &Live<T>) -> Live<T> {
        binary(self, rhs, |a: T, b: T| Ok(a.max_with(b)))
    }
}

impl Live<i64> {
    /// Integer to float conversion.
    pub fn to_float(&self) -> Live<f64> {
        unary(self, |v: i64| Ok(v as f64))
    }

    /// `self > 0`. Raw input signals read as "on" when positive.
    pub fn is_positive(&self) -> Live<bool> {
        unary(self, |v: i64| Ok(v > 0))
    }
}

impl Live<f64> {
    /// Float to integer conversion, truncating toward zero. NaN reads as 0
    /// and out-of-range values saturate.
    pub fn to_int(&self) -> Live<i64> {
        unary(self, |v: f64| Ok(v as i64))
    }
}

// ---------------------------------------------------------------------------
// std::ops
// ---------------------------------------------------------------------------

macro_rules! impl_numeric_binop {
    ($($trait:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl<T: Numeric> $trait<&Live<T>> for &Live<T> {
                type Output = Live<T>;

                fn $method(self, rhs: &Live<T>) -> Live<T> {
                    binary(self, rhs, |a: T, b: T| a.$op(b))
                }
            }

            impl<T: Numeric> $trait<Live<T>> for Live<T> {
                type Output = Live<T>;

                fn $method(self, rhs: Live<T>) -> Live<T> {
                    (&self).$method(&rhs)
                }
            }

            impl<T: Numeric> $trait<&Live<T>> for Live<T> {
                type Output = Live<T>;

                fn $method(self, rhs: &Live<T>) -> Live<T> {
                    (&self).$method(rhs)
                }
            }

            impl<T: Numeric> $trait<Live<T>> for &Live<T> {
                type Output = Live<T>;

                fn $method(self, rhs: Live<T>) -> Live<T> {
                    self.$method(&rhs)
                }
            }
        )*
    };
}

impl_numeric_binop!(
    Add::add => try_add,
    Sub::sub => try_sub,
    Mul::mul => try_mul,
    Div::div => try_div,
);

impl<T: Numeric> Neg for &Live<T> {
    type Output = Live<T>;

    fn neg(self) -> Live<T> {
        unary(self, |v: T| v.try_neg())
    }
}

impl<T: Numeric> Neg for Live<T> {
    type Output = Live<T>;

    fn neg(self) -> Live<T> {
        -&self
    }
}

macro_rules! impl_bool_binop {
    ($($trait:ident :: $method:ident => $inherent:ident),* $(,)?) => {
        $(
            impl $trait<&Live<bool>> for &Live<bool> {
                type Output = Live<bool>;

                fn $method(self, rhs: &Live<bool>) -> Live<bool> {
                    Live::<bool>::$inherent(self, rhs)
                }
            }

            impl $trait<Live<bool>> for Live<bool> {
                type Output = Live<bool>;

                fn $method(self, rhs: Live<bool>) -> Live<bool> {
                    Live::<bool>::$inherent(&self, &rhs)
                }
            }
        )*
    };
}

impl_bool_binop!(BitAnd::bitand => and, BitOr::bitor => or);

impl Not for &Live<bool> {
    type Output = Live<bool>;

    fn not(self) -> Live<bool> {
        Live::<bool>::negate(self)
    }
}

impl Not for Live<bool> {
    type Output = Live<bool>;

    fn not(self) -> Live<bool> {
        Live::<bool>::negate(&self)
    }
}

impl<T: Scalar> From<(&Live<T>, &Live<T>)> for Branches<T> {
    fn from((when_true, when_false): (&Live<T>, &Live<T>)) -> Self {
        pair_operands(when_true, when_false)
    }
}
