#![forbid(unsafe_code)]

//! Live values public facade.
//!
//! Re-exports the cell core and, with the `sources` feature (on by
//! default), the external source adapters.
//!
//! ```
//! use live::prelude::*;
//!
//! let config = LiveConfig::live().with_seed(7);
//! let sources = Sources::new(&config);
//! let jitter = sources.live_random_float(-0.5, 0.5);
//! let x = &config.constant(10.0) + &jitter;
//! assert!((9.5..=10.5).contains(&x.resolve()));
//! ```

pub use live_core::*;

#[cfg(feature = "sources")]
pub use live_sources as sources;

pub mod prelude {
    pub use live_core as core;
    pub use live_core::{
        Branches, EvalError, EvaluationMode, Live, LiveBinding, LiveBool, LiveColor,
        LiveConfig, LiveFloat, LiveInt, Rgba, pair_operands, select_if,
    };

    #[cfg(feature = "sources")]
    pub use live_sources::{InputRegistry, ManualTimeSource, SharedRng, Sources};
}
