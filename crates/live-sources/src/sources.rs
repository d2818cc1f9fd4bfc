#![forbid(unsafe_code)]

//! [`Sources`]: one place to build every external-source cell.
//!
//! The factory carries the evaluation mode and the shared providers, so
//! cells built from it agree on time, randomness and device state.

use std::rc::Rc;

use live_core::{EvaluationMode, Live, LiveConfig, Rgba};

use crate::appearance::{self, AppearanceProvider, NoAppearance};
use crate::clock::{self, SystemTimeSource, TimeSource};
use crate::frame;
use crate::input::{self, InputProvider, InputRegistry};
use crate::random::{self, SharedRng};

#[derive(Clone)]
pub struct Sources {
    mode: EvaluationMode,
    time: Rc<dyn TimeSource>,
    rng: SharedRng,
    appearance: Rc<dyn AppearanceProvider>,
    input: Rc<dyn InputProvider>,
}

impl Sources {
    /// Platform clock, an RNG seeded from `config.seed` (or the OS), no
    /// appearance information and an empty input registry.
    #[must_use]
    pub fn new(config: &LiveConfig) -> Self {
        tracing::debug!(
            message = "live.sources.init",
            mode = %config.mode,
            seed = ?config.seed
        );
        Self {
            mode: config.mode,
            time: Rc::new(SystemTimeSource::new()),
            rng: SharedRng::from_seed(config.seed),
            appearance: Rc::new(NoAppearance),
            input: Rc::new(InputRegistry::new()),
        }
    }

    #[must_use]
    pub fn with_time_source(mut self, time: Rc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: SharedRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn with_appearance(mut self, provider: Rc<dyn AppearanceProvider>) -> Self {
        self.appearance = provider;
        self
    }

    #[must_use]
    pub fn with_input(mut self, provider: Rc<dyn InputProvider>) -> Self {
        self.input = provider;
        self
    }

    #[must_use]
    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    #[must_use]
    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    /// Whole seconds since the time source started.
    pub fn seconds(&self) -> Live<i64> {
        clock::seconds(self.mode, Rc::clone(&self.time))
    }

    pub fn seconds_since_1970(&self) -> Live<i64> {
        clock::seconds_since_1970(self.mode, Rc::clone(&self.time))
    }

    /// Fractional seconds since the time source started.
    pub fn elapsed(&self) -> Live<f64> {
        clock::elapsed(self.mode, Rc::clone(&self.time))
    }

    pub fn frame_index(&self) -> Live<i64> {
        frame::frame_index(self.mode)
    }

    /// One draw from `[min, max]`, fixed for the cell's lifetime.
    pub fn random_int(&self, min: i64, max: i64) -> Live<i64> {
        random::random(self.mode, &self.rng, min..=max)
    }

    /// One draw from `[min, max)`, fixed for the cell's lifetime.
    pub fn random_float(&self, min: f64, max: f64) -> Live<f64> {
        random::random(self.mode, &self.rng, min..max)
    }

    /// A fresh draw from `[min, max]` on every read.
    pub fn live_random_int(&self, min: i64, max: i64) -> Live<i64> {
        random::live_random(self.mode, &self.rng, min..=max)
    }

    /// A fresh draw from `[min, max)` on every read.
    pub fn live_random_float(&self, min: f64, max: f64) -> Live<f64> {
        random::live_random(self.mode, &self.rng, min..max)
    }

    pub fn dark_mode(&self) -> Live<bool> {
        appearance::dark_mode(self.mode, Rc::clone(&self.appearance))
    }

    pub fn appearance_color(&self, light: Rgba, dark: Rgba) -> Live<Rgba> {
        appearance::appearance_color(self.mode, Rc::clone(&self.appearance), light, dark)
    }

    pub fn input_int(&self, address: impl Into<String>) -> Live<i64> {
        input::input_int(self.mode, Rc::clone(&self.input), address)
    }

    pub fn input_bool(&self, address: impl Into<String>) -> Live<bool> {
        input::input_bool(self.mode, Rc::clone(&self.input), address)
    }

    pub fn input_any_int(&self) -> Live<i64> {
        input::input_any_int(self.mode, Rc::clone(&self.input))
    }

    pub fn input_any_bool(&self) -> Live<bool> {
        input::input_any_bool(self.mode, Rc::clone(&self.input))
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
