// src/drivers/mod.rs
pub mod buffer;
pub mod channel;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod plot;
pub mod smoothing;
pub mod source;
// re-export what main and the GUI use
pub use channel::sample_channel;
pub use error::MonitorError;
pub use pipeline::{LiveFrame, LiveSession, SessionSummary};
pub use plot::PngSummaryExporter;
pub use source::{spawn_sampler, SamplerCommand, SamplerProcess};
