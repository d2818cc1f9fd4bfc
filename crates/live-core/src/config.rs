#![forbid(unsafe_code)]

//! Construction-time configuration.
//!
//! [`LiveConfig`] is the factory-scoped replacement for a process-wide
//! "live" switch: code that builds many cells holds one config and
//! constructs through it, so every cell records the same mode.
//!
//! # Environment
//!
//! | variable    | values                      | default |
//! |-------------|-----------------------------|---------|
//! | `LIVE_MODE` | `live`, `frozen` (any case) | `live`  |
//! | `LIVE_SEED` | `u64`                       | unset   |

use std::env;

use crate::cell::Live;
use crate::error::ConfigError;
use crate::mode::EvaluationMode;
use crate::scalar::Scalar;

pub const ENV_MODE: &str = "LIVE_MODE";
pub const ENV_SEED: &str = "LIVE_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiveConfig {
    /// Mode recorded by cells built through this config.
    pub mode: EvaluationMode,
    /// Seed for random sources; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl LiveConfig {
    /// Live mode, unseeded.
    #[must_use]
    pub fn live() -> Self {
        Self::default()
    }

    /// Frozen mode, unseeded.
    #[must_use]
    pub fn frozen() -> Self {
        Self::default().with_mode(EvaluationMode::Frozen)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read `LIVE_MODE` and `LIVE_SEED` from the process environment.
    ///
    /// Unset variables keep their defaults; malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_MODE) {
            config.mode = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            let seed = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSeed { value })?;
            config.seed = Some(seed);
        }
        Ok(config)
    }

    /// [`Live::constant`] in this config's mode.
    pub fn constant<T: Scalar>(&self, value: T) -> Live<T> {
        Live::constant(self.mode, value)
    }

    /// [`Live::from_fn`] in this config's mode.
    pub fn from_fn<T: Scalar>(&self, f: impl Fn() -> T + 'static) -> Live<T> {
        Live::from_fn(self.mode, f)
    }
}
