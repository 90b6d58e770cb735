//! CLI library components for the resolution pipeline.

pub mod logging;
