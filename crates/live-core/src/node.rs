#![forbid(unsafe_code)]

//! Composite evaluation nodes.
//!
//! A composite cell owns one node. The node owns shared handles to its
//! operand cells and evaluates them explicitly, left to right, each time
//! the composite is read. Nodes never cache.

use crate::cell::Live;
use crate::error::Result;
use crate::ops::Branches;
use crate::scalar::Scalar;

pub(crate) trait Node<T> {
    fn evaluate(&self) -> Result<T>;

    /// Longest chain of composite operands below this node, counting itself.
    fn depth(&self) -> usize;
}

pub(crate) struct Unary<A, T> {
    pub operand: Live<A>,
    pub op: fn(A) -> Result<T>,
}

impl<A: Scalar, T> Node<T> for Unary<A, T> {
    fn evaluate(&self) -> Result<T> {
        (self.op)(self.operand.try_resolve()?)
    }

    fn depth(&self) -> usize {
        self.operand.depth() + 1
    }
}

pub(crate) struct Binary<A, B, T> {
    pub lhs: Live<A>,
    pub rhs: Live<B>,
    pub op: fn(A, B) -> Result<T>,
}

impl<A: Scalar, B: Scalar, T> Node<T> for Binary<A, B, T> {
    fn evaluate(&self) -> Result<T> {
        let lhs = self.lhs.try_resolve()?;
        let rhs = self.rhs.try_resolve()?;
        (self.op)(lhs, rhs)
    }

    fn depth(&self) -> usize {
        self.lhs.depth().max(self.rhs.depth()) + 1
    }
}

pub(crate) struct Ternary<A, B, C, T> {
    pub first: Live<A>,
    pub second: Live<B>,
    pub third: Live<C>,
    pub op: fn(A, B, C) -> Result<T>,
}

impl<A: Scalar, B: Scalar, C: Scalar, T> Node<T> for Ternary<A, B, C, T> {
    fn evaluate(&self) -> Result<T> {
        let first = self.first.try_resolve()?;
        let second = self.second.try_resolve()?;
        let third = self.third.try_resolve()?;
        (self.op)(first, second, third)
    }

    fn depth(&self) -> usize {
        self.first
            .depth()
            .max(self.second.depth())
            .max(self.third.depth())
            + 1
    }
}

pub(crate) struct Map<A, T> {
    pub operand: Live<A>,
    pub f: Box<dyn Fn(A) -> T>,
}

impl<A: Scalar, T> Node<T> for Map<A, T> {
    fn evaluate(&self) -> Result<T> {
        Ok((self.f)(self.operand.try_resolve()?))
    }

    fn depth(&self) -> usize {
        self.operand.depth() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Logic {
    And,
    Or,
}

/// `&&` / `||`: the right operand is only read when it decides the result.
pub(crate) struct ShortCircuit {
    pub lhs: Live<bool>,
    pub rhs: Live<bool>,
    pub logic: Logic,
}

impl Node<bool> for ShortCircuit {
    fn evaluate(&self) -> Result<bool> {
        let lhs = self.lhs.try_resolve()?;
        match (self.logic, lhs) {
            (Logic::And, false) => Ok(false),
            (Logic::Or, true) => Ok(true),
            _ => self.rhs.try_resolve(),
        }
    }

    fn depth(&self) -> usize {
        self.lhs.depth().max(self.rhs.depth()) + 1
    }
}

/// Reads the condition, then only the chosen branch.
pub(crate) struct Select<T> {
    pub condition: Live<bool>,
    pub branches: Branches<T>,
}

impl<T: Scalar> Node<T> for Select<T> {
    fn evaluate(&self) -> Result<T> {
        if self.condition.try_resolve()? {
            self.branches.when_true().try_resolve()
        } else {
            self.branches.when_false().try_resolve()
        }
    }

    fn depth(&self) -> usize {
        self.condition
            .depth()
            .max(self.branches.when_true().depth())
            .max(self.branches.when_false().depth())
            + 1
    }
}
