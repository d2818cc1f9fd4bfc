#![forbid(unsafe_code)]

//! Random cells.
//!
//! `random_*` draws once, when the cell is built, and the cell holds that
//! draw in either mode. `live_random_*` draws on every live read (and once,
//! at construction, in frozen mode).
//!
//! All draws come from one shared [`SharedRng`], seeded from
//! [`LiveConfig::seed`](live_core::LiveConfig) when set so that runs can be
//! replayed.
//!
//! A range that cannot be sampled (empty, or a float range whose bounds or
//! span are not finite) reads as the type's default (`0` / `0.0`) and logs
//! a warning.

use std::cell::RefCell;
use std::rc::Rc;

use live_core::{EvaluationMode, Live, Scalar};
use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A generator shared by every random cell built from the same sources.
#[derive(Debug, Clone)]
pub struct SharedRng {
    rng: Rc<RefCell<SmallRng>>,
}

impl SharedRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_os() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Seeded when `seed` is set, otherwise from the OS.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os, Self::seeded)
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng: Rc::new(RefCell::new(rng)),
        }
    }

    /// One draw from `range`, or `T::default()` when the range cannot be
    /// sampled.
    pub fn draw<T, R>(&self, range: R) -> T
    where
        T: SampleUniform + Default,
        R: SampleRange<T>,
    {
        match range.sample_single(&mut *self.rng.borrow_mut()) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(message = "live.random.invalid_range", error = %err);
                T::default()
            }
        }
    }
}

/// One draw from `range`, fixed for the cell's lifetime.
pub fn random<T, R>(mode: EvaluationMode, rng: &SharedRng, range: R) -> Live<T>
where
    T: Scalar + SampleUniform + Default,
    R: SampleRange<T>,
{
    Live::constant(mode, rng.draw(range))
}

/// A fresh draw from `range` on every read.
pub fn live_random<T, R>(mode: EvaluationMode, rng: &SharedRng, range: R) -> Live<T>
where
    T: Scalar + SampleUniform + Default,
    R: SampleRange<T> + Clone + 'static,
{
    let rng = rng.clone();
    Live::from_fn(mode, move || rng.draw(range.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn random_is_fixed_at_birth() {
        let rng = SharedRng::seeded(7);
        for mode in [EvaluationMode::Live, EvaluationMode::Frozen] {
            let cell = random(mode, &rng, 0i64..1_000_000);
            let first = cell.resolve();
            for _ in 0..10 {
                assert_eq!(cell.resolve(), first);
            }
        }
    }

    #[test]
    fn live_random_stays_in_range() {
        let rng = SharedRng::seeded(11);
        let cell = live_random(EvaluationMode::Live, &rng, 5i64..=8);
        for _ in 0..200 {
            assert!((5..=8).contains(&cell.resolve()));
        }

        let float = live_random(EvaluationMode::Live, &rng, 0.25f64..0.5);
        for _ in 0..200 {
            let v = float.resolve();
            assert!((0.25..=0.5).contains(&v));
        }
    }

    #[test]
    fn live_random_redraws() {
        let rng = SharedRng::seeded(3);
        let cell = live_random(EvaluationMode::Live, &rng, 0i64..i64::MAX);
        let draws: Vec<i64> = (0..8).map(|_| cell.resolve()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn frozen_live_random_draws_once() {
        let rng = SharedRng::seeded(3);
        let cell = live_random(EvaluationMode::Frozen, &rng, 0i64..i64::MAX);
        let first = cell.resolve();
        assert_eq!(cell.resolve(), first);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SharedRng::seeded(42);
        let b = SharedRng::seeded(42);
        let xs: Vec<i64> = (0..16).map(|_| a.draw(0i64..100)).collect();
        let ys: Vec<i64> = (0..16).map(|_| b.draw(0i64..100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    #[traced_test]
    fn empty_range_degrades_to_default() {
        let rng = SharedRng::seeded(1);
        assert_eq!(random(EvaluationMode::Live, &rng, 5i64..5).resolve(), 0);
        assert_eq!(rng.draw(1.0f64..1.0), 0.0);
        assert!(logs_contain("live.random.invalid_range"));
    }

    #[test]
    #[traced_test]
    fn non_finite_float_range_degrades_to_default() {
        let rng = SharedRng::seeded(1);
        let whole_line = random(EvaluationMode::Live, &rng, f64::MIN..f64::MAX);
        let unbounded = live_random(EvaluationMode::Live, &rng, 0.0f64..f64::INFINITY);
        assert_eq!(whole_line.resolve(), 0.0);
        assert_eq!(unbounded.resolve(), 0.0);
        assert_eq!(unbounded.resolve(), 0.0);
        assert_eq!(rng.draw(f64::NAN..1.0), 0.0);
        assert!(logs_contain("live.random.invalid_range"));
    }
}
