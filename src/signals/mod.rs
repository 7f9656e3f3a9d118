//! Signal derivation interfaces.

pub mod alert;
pub mod derivation;
pub mod engine;

pub use alert::*;
pub use derivation::*;
pub use engine::SignalEngine;
