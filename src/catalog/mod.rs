//! Per-platform catalogs of junk-data locations.
//!
//! A catalog maps a human-readable category name to the candidate paths
//! that hold that kind of data. Entries are declarative: nothing here checks
//! whether a path exists, except glob entries which are expanded against
//! the live filesystem when the catalog is built.

pub mod env;
mod linux;
mod macos;
mod windows;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cleaner::maintenance::MaintenanceAction;
use crate::common::config::Config;
use crate::common::platform::Platform;
pub use env::Environment;

/// One class of reclaimable data and where it lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub paths: Vec<PathBuf>,
}

impl Category {
    /// Candidate paths that currently exist
    pub fn existing_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter().filter(|p| p.exists())
    }
}

/// Insertion-ordered set of categories with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Build the catalog for `env`'s platform.
    pub fn for_environment(env: &Environment) -> Self {
        env.platform().profile().catalog(env)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Drop the categories `config` excludes
    pub fn excluding(mut self, config: &Config) -> Self {
        self.categories.retain(|c| !config.is_excluded(&c.name));
        self
    }
}

impl IntoIterator for Catalog {
    type Item = Category;
    type IntoIter = std::vec::IntoIter<Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    categories: Vec<Category>,
}

impl CatalogBuilder {
    /// Append a category. A repeated name extends the existing entry.
    pub fn category<I, P>(mut self, name: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths = paths.into_iter().map(Into::into);
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.paths.extend(paths),
            None => self.categories.push(Category {
                name: name.to_string(),
                paths: paths.collect(),
            }),
        }
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            categories: self.categories,
        }
    }
}

/// Expand `root/<pattern>` against the filesystem.
///
/// Returns nothing when `root` is missing. Characters in `root` are matched
/// literally; only `pattern` is interpreted as a glob.
pub fn expand_glob(root: &Path, pattern: &str) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    let full = format!("{}/{}", escaped.trim_end_matches(['/', '\\']), pattern);
    match glob::glob(&full) {
        Ok(entries) => entries.filter_map(|e| e.ok()).collect(),
        Err(e) => {
            tracing::debug!("bad glob pattern {}: {}", full, e);
            Vec::new()
        }
    }
}

/// Everything that differs between operating systems
pub trait PlatformProfile: Sync {
    fn platform(&self) -> Platform;

    /// Category → candidate paths for this environment
    fn catalog(&self, env: &Environment) -> Catalog;

    /// Best-effort OS actions run after a clean pass, in order
    fn maintenance(&self) -> Vec<Box<dyn MaintenanceAction>>;
}

impl Platform {
    pub fn profile(&self) -> &'static dyn PlatformProfile {
        match self {
            Platform::Windows => &windows::WindowsProfile,
            Platform::MacOs => &macos::MacOsProfile,
            Platform::Linux => &linux::LinuxProfile,
        }
    }
}
