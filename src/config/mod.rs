//! Persistent library preferences: logging filter and removal stamping policy.

pub mod manager;
pub mod model;

pub use manager::ConfigManager;
pub use model::Config;
