#![forbid(unsafe_code)]

//! The value cell.
//!
//! # Design
//!
//! [`Live<T>`] is a cheap handle (`Rc`) to shared cell state. The state holds
//! exactly one [`Source`]:
//!
//! - `Recompute`: a function called on every read (live mode),
//! - `Snapshot`: the result of calling that function once at construction
//!   (frozen mode),
//! - `Derived`: a composite node owning handles to its operand cells,
//! - `Bound`: a slot written through a [`LiveBinding`](crate::LiveBinding).
//!
//! Which of the first three a cell gets is decided by the
//! [`EvaluationMode`] passed to its constructor and never revisited.
//!
//! # Invariants
//!
//! 1. A live-mode read calls the source function exactly once; nothing is
//!    cached between reads.
//! 2. A frozen-mode cell called its source function exactly once, during
//!    construction.
//! 3. With `limit` set, every successful read lies in the min-then-max
//!    clamp of `[min, max]`.
//! 4. Reading never mutates the cell. Only [`sample`](Live::sample) and
//!    [`sample_if_changed`](Live::sample_if_changed) write the
//!    change-detection memo.
//!
//! # Failure Modes
//!
//! - **Integer fault in a composite**: [`try_resolve`](Live::try_resolve)
//!   returns the [`EvalError`](crate::EvalError);
//!   [`resolve`](Live::resolve) logs it and panics. A frozen composite stores the fault and reports it on every
//!   read.
//! - **Source function panics**: propagates to the reader.

use std::cell::RefCell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use crate::error::Result;
use crate::mode::EvaluationMode;
use crate::node::{Map, Node};
use crate::scalar::{Numeric, Scalar};

pub(crate) enum Source<T> {
    Recompute(Rc<dyn Fn() -> T>),
    Snapshot(Result<T>),
    Derived(Rc<dyn Node<T>>),
    Bound(Rc<RefCell<T>>),
}

// Manual impl: only the snapshot needs `T: Clone`.
impl<T: Clone> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Recompute(f) => Self::Recompute(Rc::clone(f)),
            Self::Snapshot(result) => Self::Snapshot(result.clone()),
            Self::Derived(node) => Self::Derived(Rc::clone(node)),
            Self::Bound(slot) => Self::Bound(Rc::clone(slot)),
        }
    }
}

impl<T> Source<T> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Recompute(_) => "recompute",
            Self::Snapshot(_) => "snapshot",
            Self::Derived(_) => "derived",
            Self::Bound(_) => "bound",
        }
    }
}

/// Clamp configuration of a numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub limit: bool,
    pub min: T,
    pub max: T,
}

impl<T: Numeric> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            limit: false,
            min: T::ZERO,
            max: T::ONE,
        }
    }
}

struct LiveInner<T> {
    name: RefCell<Option<String>>,
    mode: EvaluationMode,
    source: RefCell<Source<T>>,
    /// `None` until a numeric cell's bounds are first touched.
    bounds: RefCell<Option<Bounds<T>>>,
    last_sample: RefCell<Option<T>>,
}

/// A named, typed, lazily evaluated value.
///
/// Cloning a `Live` creates a new handle to the **same** cell.
pub struct Live<T> {
    inner: Rc<LiveInner<T>>,
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Scalar> Live<T> {
    fn with_source(mode: EvaluationMode, source: Source<T>) -> Self {
        Self {
            inner: Rc::new(LiveInner {
                name: RefCell::new(None),
                mode,
                source: RefCell::new(source),
                bounds: RefCell::new(None),
                last_sample: RefCell::new(None),
            }),
        }
    }

    /// A cell holding `value`.
    pub fn constant(mode: EvaluationMode, value: T) -> Self {
        match mode {
            EvaluationMode::Live => {
                Self::with_source(mode, Source::Recompute(Rc::new(move || value.clone())))
            }
            EvaluationMode::Frozen => Self::with_source(mode, Source::Snapshot(Ok(value))),
        }
    }

    /// A live-mode cell holding `value`.
    pub fn new(value: T) -> Self {
        Self::constant(EvaluationMode::Live, value)
    }

    /// A live-mode cell holding `value`, labelled `name`.
    pub fn named(name: impl Into<String>, value: T) -> Self {
        Self::new(value).with_name(name)
    }

    /// A cell computed by `f`.
    ///
    /// In live mode `f` runs on every read. In frozen mode it runs exactly
    /// once, here, and is then dropped.
    pub fn from_fn(mode: EvaluationMode, f: impl Fn() -> T + 'static) -> Self {
        match mode {
            EvaluationMode::Live => Self::with_source(mode, Source::Recompute(Rc::new(f))),
            EvaluationMode::Frozen => {
                let value = f();
                tracing::trace!(message = "live.snapshot", value = ?value);
                Self::with_source(mode, Source::Snapshot(Ok(value)))
            }
        }
    }

    pub(crate) fn derive(mode: EvaluationMode, node: impl Node<T> + 'static) -> Self {
        match mode {
            EvaluationMode::Live => Self::with_source(mode, Source::Derived(Rc::new(node))),
            EvaluationMode::Frozen => {
                let result = node.evaluate();
                tracing::trace!(message = "live.snapshot", derived = true, ok = result.is_ok());
                Self::with_source(mode, Source::Snapshot(result))
            }
        }
    }

    /// A composite cell applying `f` to this cell's value on every read.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U + 'static) -> Live<U> {
        Live::derive(
            self.mode(),
            Map {
                operand: self.clone(),
                f: Box::new(f),
            },
        )
    }

    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.inner.name.borrow_mut() = Some(name.into());
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.inner.name.borrow().clone()
    }

    /// The mode this cell was constructed in.
    #[must_use]
    pub fn mode(&self) -> EvaluationMode {
        self.inner.mode
    }

    /// Whether this cell was produced by the operator algebra and still
    /// evaluates its operands on read.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        matches!(*self.inner.source.borrow(), Source::Derived(_))
    }

    /// Whether a [`LiveBinding`](crate::LiveBinding) drives this cell.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(*self.inner.source.borrow(), Source::Bound(_))
    }

    /// Length of the longest operand chain evaluated by one read.
    ///
    /// Leaf cells have depth 0; frozen composites are leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &*self.inner.source.borrow() {
            Source::Derived(node) => node.depth(),
            _ => 0,
        }
    }

    fn raw(&self) -> Result<T> {
        // Clone the source out so a reader never holds the borrow while
        // user code runs.
        let source = self.inner.source.borrow().clone();
        match source {
            Source::Recompute(f) => Ok(f()),
            Source::Snapshot(result) => result,
            Source::Derived(node) => node.evaluate(),
            Source::Bound(slot) => Ok(slot.borrow().clone()),
        }
    }

    /// Evaluate the cell, applying bounds.
    pub fn try_resolve(&self) -> Result<T> {
        let raw = self.raw()?;
        Ok(match &*self.inner.bounds.borrow() {
            Some(bounds) if bounds.limit => raw.bounded(&bounds.min, &bounds.max),
            _ => raw,
        })
    }

    /// Evaluate the cell, applying bounds.
    ///
    /// # Panics
    ///
    /// Panics on an evaluation fault, such as integer division by zero
    /// anywhere in the operand chain. Use [`try_resolve`](Self::try_resolve)
    /// to observe the fault instead.
    pub fn resolve(&self) -> T {
        match self.try_resolve() {
            Ok(value) => value,
            Err(err) => {
                let name = self.name().unwrap_or_default();
                tracing::warn!(
                    message = "live.eval_fault",
                    name = %name,
                    operation = err.operation(),
                    error = %err
                );
                panic!("live value evaluation failed: {err}");
            }
        }
    }

    /// Alias of [`resolve`](Self::resolve).
    pub fn value(&self) -> T {
        self.resolve()
    }

    /// Alias of [`resolve`](Self::resolve).
    pub fn val(&self) -> T {
        self.resolve()
    }

    // ── Change detection ─────────────────────────────────────────────

    /// Evaluate once, remember the result, and return it.
    pub fn sample(&self) -> T {
        let value = self.resolve();
        *self.inner.last_sample.borrow_mut() = Some(value.clone());
        value
    }

    /// Whether a fresh evaluation differs from the last sample.
    ///
    /// Evaluates exactly once and compares against the stored sample; the
    /// memo is left untouched. A cell that was never sampled reports `true`.
    pub fn has_changed(&self) -> bool {
        let current = self.resolve();
        self.inner.last_sample.borrow().as_ref() != Some(&current)
    }

    /// Evaluate once; if the value differs from the last sample, remember
    /// it and return it.
    pub fn sample_if_changed(&self) -> Option<T> {
        let current = self.resolve();
        let mut last = self.inner.last_sample.borrow_mut();
        if last.as_ref() == Some(&current) {
            return None;
        }
        *last = Some(current.clone());
        Some(current)
    }

    #[must_use]
    pub fn last_sample(&self) -> Option<T> {
        self.inner.last_sample.borrow().clone()
    }

    pub fn clear_sample(&self) {
        self.inner.last_sample.borrow_mut().take();
    }

    pub(crate) fn install_source(&self, source: Source<T>) {
        *self.inner.source.borrow_mut() = source;
    }
}

// ── Constraint layer ─────────────────────────────────────────────────────

impl<T: Numeric> Live<T> {
    /// A cell holding `value`, clamped into `[min, max]` on every read.
    pub fn bounded(mode: EvaluationMode, value: T, min: T, max: T) -> Self {
        Self::constant(mode, value).with_bounds(min, max)
    }

    /// Enable clamping into `[min, max]`.
    ///
    /// `min <= max` is not checked; an inverted range clamps every read to
    /// `min`.
    #[must_use]
    pub fn with_bounds(self, min: T, max: T) -> Self {
        *self.inner.bounds.borrow_mut() = Some(Bounds {
            limit: true,
            min,
            max,
        });
        self
    }

    fn update_bounds(&self, f: impl FnOnce(&mut Bounds<T>)) {
        let mut bounds = self.inner.bounds.borrow_mut();
        f(bounds.get_or_insert_with(Bounds::default));
    }

    pub fn set_limit(&self, limit: bool) {
        self.update_bounds(|b| b.limit = limit);
    }

    pub fn set_min(&self, min: T) {
        self.update_bounds(|b| b.min = min);
    }

    pub fn set_max(&self, max: T) {
        self.update_bounds(|b| b.max = max);
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds<T> {
        self.inner.bounds.borrow().unwrap_or_default()
    }

    #[must_use]
    pub fn limit(&self) -> bool {
        self.bounds().limit
    }

    #[must_use]
    pub fn min(&self) -> T {
        self.bounds().min
    }

    #[must_use]
    pub fn max(&self) -> T {
        self.bounds().max
    }

    /// `min..max`, for randomization and iteration helpers. Not validated.
    #[must_use]
    pub fn range(&self) -> Range<T> {
        let bounds = self.bounds();
        bounds.min..bounds.max
    }
}

// ── Description ──────────────────────────────────────────────────────────

impl<T: Scalar> fmt::Display for Live<T> {
    /// `live[name](value)`, or `live(value)` when unnamed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("live")?;
        if let Some(name) = self.inner.name.borrow().as_deref() {
            write!(f, "[{name}]")?;
        }
        match self.try_resolve() {
            Ok(value) => write!(f, "({value})"),
            Err(err) => write!(f, "({err})"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Live<T> {
    // Does not evaluate: reading may have side effects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Live")
            .field("name", &self.inner.name.borrow())
            .field("mode", &self.inner.mode)
            .field("source", &self.inner.source.borrow().kind())
            .field("last_sample", &self.inner.last_sample.borrow())
            .finish()
    }
}

// ── Literal conversions ──────────────────────────────────────────────────

macro_rules! impl_literal {
    ($($scalar:ty => $from:ty),* $(,)?) => {
        $(
            impl From<$from> for Live<$scalar> {
                fn from(value: $from) -> Self {
                    Self::new(<$scalar>::from(value))
                }
            }
        )*
    };
}

impl_literal!(
    bool => bool,
    i64 => i64,
    i64 => i32,
    f64 => f64,
    f64 => f32,
    crate::color::Rgba => crate::color::Rgba,
);

macro_rules! impl_resolve_into {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl From<&Live<$scalar>> for $scalar {
                fn from(cell: &Live<$scalar>) -> Self {
                    cell.resolve()
                }
            }
        )*
    };
}

impl_resolve_into!(bool, i64, f64, crate::color::Rgba);
