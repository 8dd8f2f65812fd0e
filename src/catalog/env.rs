use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::common::platform::Platform;

/// Snapshot of everything catalog construction is allowed to read:
/// the platform, the user's home directory and the process environment.
#[derive(Debug, Clone)]
pub struct Environment {
    platform: Platform,
    home: PathBuf,
    vars: HashMap<String, OsString>,
}

impl Environment {
    /// Environment with no variables set, for explicit construction.
    pub fn new(platform: Platform, home: impl Into<PathBuf>) -> Self {
        Self {
            platform,
            home: home.into(),
            vars: HashMap::new(),
        }
    }

    /// Capture the live process environment for `platform`.
    pub fn capture(platform: Platform) -> Self {
        let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| k.into_string().ok().map(|k| (k, v)))
            .collect();
        Self {
            platform,
            home,
            vars,
        }
    }

    pub fn with_var(mut self, name: &str, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Path-valued variable, ignoring empty values.
    pub fn var_path(&self, name: &str) -> Option<PathBuf> {
        self.vars
            .get(name)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Path-valued variable with a fallback
    pub fn var_path_or(&self, name: &str, default: impl Into<PathBuf>) -> PathBuf {
        self.var_path(name).unwrap_or_else(|| default.into())
    }
}
