//! Input/output: CLI, rendering, progress, logging and errors

/// Command-line parsing and batch file processing
pub mod cli;
/// Engine constants and CLI defaults
pub mod configuration;
/// Error type shared by the crate
pub mod error;
/// Wave rendering and PNG export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress bars
pub mod progress;
/// Animation capture and GIF export
pub mod visualization;
