#![forbid(unsafe_code)]

//! Scalar types a cell can hold, and the arithmetic the operator algebra
//! performs on them.

use std::fmt;

use crate::color::Rgba;
use crate::error::{EvalError, Result};

/// A value a [`Live`](crate::Live) cell can hold.
pub trait Scalar: Clone + PartialEq + fmt::Debug + fmt::Display + 'static {
    /// Clamp `self` into `[min, max]`.
    ///
    /// Only ordered scalars are ever bounded; the default returns `self`.
    fn bounded(self, _min: &Self, _max: &Self) -> Self {
        self
    }
}

impl Scalar for bool {}

impl Scalar for Rgba {}

/// Ordered scalars that support bounds and arithmetic.
///
/// Integer arithmetic is checked: division by zero and overflow become
/// [`EvalError`]s. Float arithmetic follows IEEE 754 and never faults.
pub trait Numeric: Scalar + Copy + PartialOrd {
    const ZERO: Self;
    const ONE: Self;

    fn try_add(self, rhs: Self) -> Result<Self>;
    fn try_sub(self, rhs: Self) -> Result<Self>;
    fn try_mul(self, rhs: Self) -> Result<Self>;
    fn try_div(self, rhs: Self) -> Result<Self>;
    fn try_neg(self) -> Result<Self>;

    /// `max(min(self, max), min)`: the upper bound is applied first, so an
    /// inverted range collapses to `min`.
    fn clamp_min_then_max(self, min: Self, max: Self) -> Self {
        let capped = if max < self { max } else { self };
        if min > capped { min } else { capped }
    }

    fn min_with(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    fn max_with(self, other: Self) -> Self {
        if other > self { other } else { self }
    }
}

impl Scalar for i64 {
    fn bounded(self, min: &Self, max: &Self) -> Self {
        self.clamp_min_then_max(*min, *max)
    }
}

impl Scalar for f64 {
    fn bounded(self, min: &Self, max: &Self) -> Self {
        self.clamp_min_then_max(*min, *max)
    }
}

impl Numeric for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    fn try_add(self, rhs: Self) -> Result<Self> {
        self.checked_add(rhs)
            .ok_or(EvalError::Overflow { operation: "add" })
    }

    fn try_sub(self, rhs: Self) -> Result<Self> {
        self.checked_sub(rhs)
            .ok_or(EvalError::Overflow { operation: "sub" })
    }

    fn try_mul(self, rhs: Self) -> Result<Self> {
        self.checked_mul(rhs)
            .ok_or(EvalError::Overflow { operation: "mul" })
    }

    fn try_div(self, rhs: Self) -> Result<Self> {
        if rhs == 0 {
            return Err(EvalError::DivisionByZero { operation: "div" });
        }
        // i64::MIN / -1
        self.checked_div(rhs)
            .ok_or(EvalError::Overflow { operation: "div" })
    }

    fn try_neg(self) -> Result<Self> {
        self.checked_neg()
            .ok_or(EvalError::Overflow { operation: "neg" })
    }
}

impl Numeric for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn try_add(self, rhs: Self) -> Result<Self> {
        Ok(self + rhs)
    }

    fn try_sub(self, rhs: Self) -> Result<Self> {
        Ok(self - rhs)
    }

    fn try_mul(self, rhs: Self) -> Result<Self> {
        Ok(self * rhs)
    }

    fn try_div(self, rhs: Self) -> Result<Self> {
        Ok(self / rhs)
    }

    fn try_neg(self) -> Result<Self> {
        Ok(-self)
    }
}
