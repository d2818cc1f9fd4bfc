#![forbid(unsafe_code)]

//! External sources for live values.
//!
//! Every adapter here builds a [`Live`](live_core::Live) cell whose value
//! comes from outside the program: the clock, a frame counter, a random
//! generator, the host's light/dark appearance, or an input device. Hosts
//! plug their own backends in through the provider traits; the in-memory
//! providers cover tests and simple embeddings.
//!
//! ```
//! use std::rc::Rc;
//! use live_core::LiveConfig;
//! use live_sources::{InputRegistry, Sources};
//!
//! let registry = InputRegistry::new();
//! let sources = Sources::new(&LiveConfig::live().with_seed(1))
//!     .with_input(Rc::new(registry.clone()));
//!
//! let fader = sources.input_int("cc/7");
//! assert_eq!(fader.resolve(), 0);
//! registry.set("cc/7", 100);
//! assert_eq!(fader.resolve(), 100);
//! ```

pub mod appearance;
pub mod clock;
pub mod frame;
pub mod input;
pub mod random;
pub mod sources;

pub use appearance::{Appearance, AppearanceProvider, AppearanceState, NoAppearance};
pub use clock::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use frame::frame_index;
pub use input::{InputProvider, InputRegistry};
pub use random::SharedRng;
pub use sources::Sources;
