//! Human-readable strings shared by reports and terminal output.

use colored::{ColoredString, Colorize};
use std::path::Path;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// Two decimals in the largest binary unit that keeps the value under 1024,
/// e.g. `500.00 B`, `1.50 KB`. Anything past the TB range is shown in PB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

/// [`format_size`], dimmed when nothing is there and louder as it grows
pub fn paint_size(bytes: u64) -> ColoredString {
    let text = format_size(bytes);
    match bytes {
        0 => text.dimmed(),
        b if b >= GIB => text.red().bold(),
        b if b >= 100 * MIB => text.yellow(),
        _ => text.normal(),
    }
}

/// `1 item`, `3 items`
pub fn count_label(count: u64, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Show `path` relative to `~` when it lives under the home directory
pub fn display_path(path: &Path) -> String {
    let under_home = dirs::home_dir()
        .and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf));
    match under_home {
        Some(rest) => Path::new("~").join(rest).display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_two_decimals_in_every_unit() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(500), "500.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * MIB / 2), "2.50 MB");
        assert_eq!(format_size(GIB), "1.00 GB");
        assert_eq!(format_size(1024 * GIB), "1.00 TB");
        assert_eq!(format_size(1024 * 1024 * GIB), "1.00 PB");
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0, "item", "items"), "0 items");
        assert_eq!(count_label(1, "item", "items"), "1 item");
        assert_eq!(count_label(2, "category", "categories"), "2 categories");
    }

    #[test]
    fn test_display_path_under_home() {
        if let Some(home) = dirs::home_dir() {
            let shown = display_path(&home.join(".cache").join("pip"));
            assert!(shown.starts_with('~'), "got {}", shown);
            assert!(shown.ends_with("pip"));
        }
        assert_eq!(display_path(Path::new("/var/tmp/x")), "/var/tmp/x");
    }
}
