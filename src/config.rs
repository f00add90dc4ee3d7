//! Build configuration.
//!
//! [`BuildConfig`] records where the external solver library lives, which
//! Python interpreter the bindings are built against, and any extra compiler
//! flags. It is read from the environment, overridden from the command line,
//! and persisted as a JSON settings file for the build step.
//!
//! ```
//! use grimesh::config::BuildConfig;
//!
//! let config = BuildConfig::new("/opt/xflow", "python3");
//! let json = config.to_json().unwrap();
//! assert_eq!(BuildConfig::from_json(&json).unwrap(), config);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Interpreter used when `PYTHON` is not set.
pub const DEFAULT_PYTHON: &str = "python3";

/// Settings consumed by the binding build step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Root of the external solver installation.
    pub xflow_home: PathBuf,

    /// Python interpreter (path or command name).
    #[serde(default = "default_python")]
    pub python_exec: String,

    /// Extra compiler flags.
    #[serde(default)]
    pub compiler_flags: Vec<String>,
}

fn default_python() -> String {
    DEFAULT_PYTHON.to_string()
}

impl BuildConfig {
    /// Create a configuration with no extra compiler flags.
    pub fn new(xflow_home: impl Into<PathBuf>, python_exec: impl Into<String>) -> Self {
        Self {
            xflow_home: xflow_home.into(),
            python_exec: python_exec.into(),
            compiler_flags: Vec::new(),
        }
    }

    /// Read `XFLOW_HOME`, `PYTHON`, and `CFLAGS` from the process environment.
    ///
    /// The result is not validated; `XFLOW_HOME` may still be missing.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            xflow_home: var("XFLOW_HOME").map(PathBuf::from).unwrap_or_default(),
            python_exec: var("PYTHON")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(default_python),
            compiler_flags: var("CFLAGS")
                .map(|f| f.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    /// Load a configuration from a JSON settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and write the configuration to a JSON settings file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("wrote build settings to {}", path.as_ref().display());
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.xflow_home.as_os_str().is_empty() {
            return Err(MeshError::Config(
                "xflow_home is not set (use XFLOW_HOME or --xflow-home)".to_string(),
            ));
        }
        if self.python_exec.trim().is_empty() {
            return Err(MeshError::Config("python_exec cannot be empty".to_string()));
        }
        if self.compiler_flags.iter().any(|f| f.trim().is_empty()) {
            return Err(MeshError::Config("compiler flags cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Directory containing the external library's headers.
    pub fn include_dir(&self) -> PathBuf {
        self.xflow_home.join("include")
    }

    /// Directory containing the external library's compiled libraries.
    pub fn lib_dir(&self) -> PathBuf {
        self.xflow_home.join("lib")
    }
}
