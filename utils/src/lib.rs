//! Shared utilities for Pixel Pulse binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
