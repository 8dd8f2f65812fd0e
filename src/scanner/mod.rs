pub mod size;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use crate::catalog::{Catalog, Environment};
use crate::common::config::Config;
use crate::common::format::format_size;
use crate::common::platform::Platform;

pub use size::{dir_size, entry_size};

/// Per-category aggregate of a scan pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub category: String,
    pub size: u64,
    pub size_human: String,
    /// Every candidate path considered, existing or not
    pub paths: Vec<PathBuf>,
}

/// Complete scan report
#[derive(Debug, Clone, Serialize)]
pub struct TotalReport {
    pub total: u64,
    pub total_human: String,
    /// Categories with at least one existing path, largest first
    pub categories: Vec<ScanResult>,
    pub os: Platform,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub duration_secs: f64,
}

impl TotalReport {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub show_progress: bool,
}

/// Build the catalog for `env` and scan it. Read-only.
pub fn scan(env: &Environment, config: &Config, options: &ScanOptions) -> TotalReport {
    let catalog = Catalog::for_environment(env).excluding(config);
    scan_catalog(&catalog, env.platform(), options)
}

/// Measure every existing candidate path of every category.
pub fn scan_catalog(catalog: &Catalog, platform: Platform, options: &ScanOptions) -> TotalReport {
    let start = Instant::now();

    let pb = if options.show_progress {
        let pb = ProgressBar::new(catalog.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("━━░"));
        }
        Some(pb)
    } else {
        None
    };

    let mut categories = Vec::new();
    for category in catalog {
        if let Some(ref pb) = pb {
            pb.set_message(category.name.clone());
        }

        let mut exists = false;
        let mut size = 0u64;
        for path in category.existing_paths() {
            exists = true;
            size += dir_size(path);
        }

        if exists {
            tracing::debug!("scanned {}: {} bytes", category.name, size);
            categories.push(ScanResult {
                category: category.name.clone(),
                size,
                size_human: format_size(size),
                paths: category.paths.clone(),
            });
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    // Stable sort keeps catalog order between equal sizes
    categories.sort_by(|a, b| b.size.cmp(&a.size));
    let total = categories.iter().map(|c| c.size).sum();

    TotalReport {
        total,
        total_human: format_size(total),
        categories,
        os: platform,
        timestamp: chrono::Utc::now(),
        duration_secs: start.elapsed().as_secs_f64(),
    }
}
