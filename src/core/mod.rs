//! Core application primitives (pipeline, runtime loop, service wiring)

pub mod bootstrap;
pub mod http;
pub mod pipeline;
pub mod runtime;
pub mod service;

pub use pipeline::{CandleOutcome, SignalPipeline};
pub use runtime::{SessionEnd, SignalRuntime};
pub use service::{SignalService, StartStatus};
