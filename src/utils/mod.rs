//! Utility modules for durations, error handling and configuration

pub mod config;
pub mod duration;
pub mod error;

// Re-export for convenience
pub use config::{default_settings_path, AutotubeSettings};
pub use duration::{format_duration, parse_duration, IsoDuration};
pub use error::AutotubeError;
