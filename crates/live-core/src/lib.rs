#![forbid(unsafe_code)]

//! Live values: named, typed cells whose value is either recomputed on
//! every read or frozen at construction.
//!
//! - [`Live<T>`]: the value cell, for `T` in `bool`, `i64`, `f64`, [`Rgba`].
//! - [`EvaluationMode`]: chosen per cell at construction.
//! - Operator algebra ([`ops`]): comparisons, arithmetic, min/max, negation,
//!   boolean logic and [`select_if`], each returning a new lazy cell.
//! - Bounds: numeric cells clamp reads into `[min, max]` when limited.
//! - Change detection: [`Live::sample`] / [`Live::has_changed`].
//! - [`LiveBinding`]: get/set access for host UI code.
//!
//! # Example
//!
//! ```
//! use live_core::{EvaluationMode, Live, pair_operands, select_if};
//!
//! let a = Live::new(3i64);
//! let b = Live::new(4i64);
//! let sum = &a + &b;
//! assert_eq!(sum.resolve(), 7);
//!
//! let big = sum.gt(&Live::new(5));
//! let label = select_if(&big, pair_operands(&Live::new(1i64), &Live::new(0i64)));
//! assert_eq!(label.resolve(), 1);
//!
//! let frozen = Live::from_fn(EvaluationMode::Frozen, || 2.5f64);
//! assert_eq!(frozen.to_string(), "live(2.5)");
//! ```
//!
//! # Threading
//!
//! Cells are `!Send` and `!Sync`. Evaluation is a plain synchronous call
//! stack whose depth equals the composition depth.

pub mod binding;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod mode;
mod node;
pub mod ops;
pub mod scalar;

pub use binding::LiveBinding;
pub use cell::{Bounds, Live};
pub use color::Rgba;
pub use config::LiveConfig;
pub use error::{ConfigError, EvalError, Result};
pub use mode::EvaluationMode;
pub use ops::{Branches, pair_operands, select_if};
pub use scalar::{Numeric, Scalar};

pub type LiveBool = Live<bool>;
pub type LiveInt = Live<i64>;
pub type LiveFloat = Live<f64>;
pub type LiveColor = Live<Rgba>;
