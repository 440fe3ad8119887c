//! Substitution settings persistence.
//!
//! Settings live in a JSON or YAML file. The default location is the
//! platform config directory:
//! - Linux: ~/.config/bearcub/settings.json
//! - macOS: ~/Library/Application Support/bearcub/settings.json
//! - Windows: %APPDATA%/bearcub/settings.json

use std::path::{Path, PathBuf};

use bearcub_domain::SubstitutionSettings;
use tokio::fs;

use crate::serialization::{FileFormat, SerializationError};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for substitution settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository using the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Creates a repository for an explicit file. The extension selects the format.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default settings path, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bearcub").join("settings.json"))
    }

    /// Returns the file this repository reads and writes.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn format(path: &Path) -> FileFormat {
        FileFormat::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if there is no config directory or the file
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<SubstitutionSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(SubstitutionSettings::default());
        };

        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(SubstitutionSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings = Self::format(path).decode(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded substitution settings");
        Ok(settings)
    }

    /// Saves settings to disk, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no target path or writing fails.
    pub async fn save(&self, settings: &SubstitutionSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = Self::format(path).encode(settings)?;
        fs::write(path, content).await?;
        Ok(())
    }
}
