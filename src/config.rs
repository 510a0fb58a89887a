//! Configuration loading and saving.

use std::{
    fs,
    io::ErrorKind,
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    paths,
};

/// Credentials for the n8n public API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Value sent in the API key header.
    pub api_token: String,
    /// Instance URL without a trailing slash, e.g. `https://n8n.example.com`.
    pub base_url: String,
}

impl Config {
    /// Build a config from its parts.
    pub(crate) fn new(api_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: base_url.into(),
        }
    }

    /// Load the default config from disk.
    pub(crate) fn load() -> Result<Self> {
        let path = paths::default_config_path()?;
        Self::load_from(&path)
    }

    /// Load a config file from an explicit path.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::ConfigMissing {
                    path: path.to_path_buf(),
                });
            }
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let config: Self = serde_json::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        if config.api_token.trim().is_empty() || config.base_url.trim().is_empty() {
            return Err(Error::ConfigIncomplete {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), base_url = %config.base_url, "loaded config");
        Ok(config)
    }

    /// Save the config to an explicit path, creating a private parent directory.
    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_private_dir(parent)?;
        }

        let mut contents =
            serde_json::to_string_pretty(self).map_err(|error| Error::ConfigSerialize { source: error })?;
        contents.push('\n');

        fs::write(path, contents).map_err(|error| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: error,
        })?;
        restrict_file(path)?;

        debug!(path = %path.display(), "saved config");
        Ok(())
    }
}

/// Create a directory readable only by the current user.
#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::{fs::DirBuilder, os::unix::fs::DirBuilderExt};

    if dir.is_dir() {
        return Ok(());
    }
    DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(|error| Error::ConfigWrite {
            path: dir.to_path_buf(),
            source: error,
        })
}

/// Create a directory readable only by the current user.
#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|error| Error::ConfigWrite {
        path: dir.to_path_buf(),
        source: error,
    })
}

/// Limit the config file to the current user, since it holds the token.
#[cfg(unix)]
fn restrict_file(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|error| {
        Error::ConfigWrite {
            path: path.to_path_buf(),
            source: error,
        }
    })
}

/// Limit the config file to the current user, since it holds the token.
#[cfg(not(unix))]
fn restrict_file(_path: &Path) -> Result<()> {
    Ok(())
}
