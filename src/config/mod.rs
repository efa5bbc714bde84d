//! Configuration management
//!
//! Rating engine parameters and the settings of the command-line binary.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::RatingConfig;
