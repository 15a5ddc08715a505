//! CLI library components for the health merge pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
