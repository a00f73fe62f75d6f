//! Platform-specific utilities.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde, settings_file};
