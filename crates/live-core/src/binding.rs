#![forbid(unsafe_code)]

//! Two-way accessors for driving a cell from outside, such as a UI slider.
//!
//! [`Live::bind`] rewires the cell **in place**: its current value seeds a
//! shared slot and the cell's source is replaced by that slot, whatever
//! mode the cell was built in. Every existing handle and every composite
//! that reads the cell sees values written through the binding.
//!
//! # Usage
//!
//! ```
//! use live_core::Live;
//!
//! let speed = Live::new(2i64).with_bounds(0, 10);
//! let doubled = &speed + &speed;
//!
//! let binding = speed.bind();
//! binding.set(4);
//! assert_eq!(doubled.resolve(), 8);
//!
//! binding.set(50);
//! assert_eq!(binding.get(), 10);
//! ```
//!
//! # Invariants
//!
//! 1. `get()` returns the cell's resolved value, bounds applied.
//! 2. `set()` never evaluates anything; the next read observes the value.
//! 3. Binding again replaces the slot: writes through an older binding no
//!    longer reach the cell.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::{Live, Source};
use crate::scalar::Scalar;

/// Get/set access to a bound cell.
pub struct LiveBinding<T> {
    cell: Live<T>,
    slot: Rc<RefCell<T>>,
}

impl<T> Clone for LiveBinding<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LiveBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveBinding")
            .field("cell", &self.cell)
            .field("slot", &self.slot.borrow())
            .finish()
    }
}

impl<T: Scalar> Live<T> {
    /// Route this cell's value through a host-writable slot.
    ///
    /// # Panics
    ///
    /// Panics if reading the current value faults (see
    /// [`resolve`](Live::resolve)).
    pub fn bind(&self) -> LiveBinding<T> {
        let current = self.resolve();
        let name = self.name().unwrap_or_default();
        tracing::debug!(
            message = "live.bind",
            name = %name,
            mode = %self.mode(),
            initial = ?current
        );
        let slot = Rc::new(RefCell::new(current));
        self.install_source(Source::Bound(Rc::clone(&slot)));
        LiveBinding {
            cell: self.clone(),
            slot,
        }
    }
}

impl<T: Scalar> LiveBinding<T> {
    /// The cell's current value, bounds applied.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.resolve()
    }

    pub fn set(&self, value: T) {
        tracing::debug!(message = "live.binding.set", value = ?value);
        *self.slot.borrow_mut() = value;
    }

    /// The bound cell.
    #[must_use]
    pub fn cell(&self) -> &Live<T> {
        &self.cell
    }

    /// Split into a getter and a setter closure, the shape most UI
    /// toolkits expect.
    pub fn into_accessors(self) -> (impl Fn() -> T, impl Fn(T)) {
        let getter = self.clone();
        (move || getter.get(), move |value: T| self.set(value))
    }
}
