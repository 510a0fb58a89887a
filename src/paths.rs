//! Config location and project-local file layout.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::error::{Error, Result};

/// Directory under the home directory that holds the config file.
const CONFIG_DIR: &str = ".n8nctl";
/// Config file name inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config.json";

/// Workflow source file name.
pub const WORKFLOW_FILE: &str = "workflow.yaml";
/// Env file consulted for `${{NAME}}` substitution.
pub const ENV_FILE: &str = ".env";
/// Directory holding the cached workflow JSON.
pub const CACHE_DIR: &str = ".out";
/// Cached workflow JSON file name.
pub const CACHE_FILE: &str = "workflow.json";

/// Return the default config path for the current user.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeDirMissing)?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Render a path for display, using a tilde prefix for the home directory.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Project-local files used by the workflow commands.
///
/// Paths are resolved against `root`. The CLI uses an empty root so that
/// paths stay relative to the working directory in messages.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory the workflow files live in.
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace rooted at the current directory.
    pub fn current() -> Self {
        Self::new(PathBuf::new())
    }

    /// Path to `workflow.yaml`.
    pub fn workflow_path(&self) -> PathBuf {
        self.root.join(WORKFLOW_FILE)
    }

    /// Path to `.env`.
    pub fn env_path(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }

    /// Path to `.out`.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    /// Path to `.out/workflow.json`.
    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir().join(CACHE_FILE)
    }
}
