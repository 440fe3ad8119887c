//! File-based persistence.

mod settings_repository;

pub use settings_repository::{SettingsError, SettingsRepository};
