#![forbid(unsafe_code)]

//! Input-device cells (MIDI controllers and similar).
//!
//! Devices are addressed by string. A provider reports the last raw value
//! seen at an address; cells read a missing value as `0` / `false`.

use std::cell::RefCell;
use std::rc::Rc;

use live_core::{EvaluationMode, Live};

pub trait InputProvider {
    /// Last raw value received at `address`.
    fn last_value(&self, address: &str) -> Option<i64>;

    /// Value of the first address that has reported anything.
    fn first_any(&self) -> Option<i64>;
}

/// In-memory [`InputProvider`] fed by the host's device loop.
///
/// Addresses keep the order in which they first reported. Clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct InputRegistry {
    values: Rc<RefCell<Vec<(String, i64)>>>,
}

impl InputRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` at `address`.
    ///
    /// Addresses are logged at debug level, which is the easiest way to
    /// discover what a device sends.
    pub fn set(&self, address: impl Into<String>, value: i64) {
        let address = address.into();
        tracing::debug!(message = "live.input", address = %address, value);
        let mut values = self.values.borrow_mut();
        match values.iter_mut().find(|(a, _)| *a == address) {
            Some((_, slot)) => *slot = value,
            None => values.push((address, value)),
        }
    }

    pub fn remove(&self, address: &str) -> Option<i64> {
        let mut values = self.values.borrow_mut();
        let index = values.iter().position(|(a, _)| a == address)?;
        Some(values.remove(index).1)
    }

    /// Addresses that have reported, in first-report order.
    #[must_use]
    pub fn addresses(&self) -> Vec<String> {
        self.values.borrow().iter().map(|(a, _)| a.clone()).collect()
    }
}

impl InputProvider for InputRegistry {
    fn last_value(&self, address: &str) -> Option<i64> {
        self.values
            .borrow()
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, v)| *v)
    }

    fn first_any(&self) -> Option<i64> {
        self.values.borrow().first().map(|(_, v)| *v)
    }
}

/// Raw value at `address`, `0` when nothing was received.
pub fn input_int(
    mode: EvaluationMode,
    provider: Rc<dyn InputProvider>,
    address: impl Into<String>,
) -> Live<i64> {
    let address = address.into();
    Live::from_fn(mode, move || provider.last_value(&address).unwrap_or(0))
}

/// `true` while the value at `address` is positive.
pub fn input_bool(
    mode: EvaluationMode,
    provider: Rc<dyn InputProvider>,
    address: impl Into<String>,
) -> Live<bool> {
    let address = address.into();
    Live::from_fn(mode, move || provider.last_value(&address).unwrap_or(0) > 0)
}

/// First value any address reported, `0` when none.
pub fn input_any_int(mode: EvaluationMode, provider: Rc<dyn InputProvider>) -> Live<i64> {
    Live::from_fn(mode, move || provider.first_any().unwrap_or(0))
}

/// `true` while the first reported value is positive.
pub fn input_any_bool(mode: EvaluationMode, provider: Rc<dyn InputProvider>) -> Live<bool> {
    Live::from_fn(mode, move || provider.first_any().unwrap_or(0) > 0)
}
