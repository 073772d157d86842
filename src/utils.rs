//! Utility functions and helpers.

pub mod general;
pub mod settings;

pub use general::format_uptime;
pub use settings::Settings;
