use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cleansweep::catalog::{Catalog, Environment};
use cleansweep::common::config::Config;
use cleansweep::common::format;
use cleansweep::common::platform::Platform;
use cleansweep::scanner::{self, size, ScanOptions};

fn write_bytes(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, vec![b'x'; len]).unwrap();
}

fn quiet() -> ScanOptions {
    ScanOptions::default()
}

// ─── Format tests ─────────────────────────────────────────────────────────────

#[test]
fn test_format_size_boundaries() {
    assert_eq!(format::format_size(0), "0.00 B");
    assert_eq!(format::format_size(1), "1.00 B");
    assert_eq!(format::format_size(1023), "1023.00 B");
    assert_eq!(format::format_size(1024), "1.00 KB");
    assert_eq!(format::format_size(1024 * 1024 - 1), "1024.00 KB");
    assert_eq!(format::format_size(1024 * 1024), "1.00 MB");
    assert_eq!(format::format_size(u64::MAX), "16384.00 PB");
}

#[test]
fn test_display_path_outside_home() {
    let path = Path::new("/tmp/test.txt");
    assert_eq!(format::display_path(path), "/tmp/test.txt");
}

// ─── Config tests ─────────────────────────────────────────────────────────────

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.pacing_ms, 50);
    assert!(config.maintenance);
    assert!(config.exclude_categories.is_empty());
    assert!(config.platform.is_none());
}

#[test]
fn test_config_serialization_roundtrip() {
    let config = Config {
        exclude_categories: vec!["Trash".into()],
        platform: Some("Linux".into()),
        ..Config::default()
    };
    let toml_str = toml::to_string_pretty(&config).unwrap();
    let loaded = Config::parse(&toml_str, Path::new("config.toml")).unwrap();

    assert_eq!(loaded.exclude_categories, vec!["Trash".to_string()]);
    assert_eq!(loaded.platform.as_deref(), Some("Linux"));
    assert!(loaded.is_excluded("trash"));
    assert!(!loaded.is_excluded("pip Cache"));
}

// ─── Size accountant tests ────────────────────────────────────────────────────

#[test]
fn test_dir_size_sums_file_sizes_exactly() {
    let dir = TempDir::new().unwrap();
    write_bytes(&dir.path().join("a.bin"), 100);
    write_bytes(&dir.path().join("b.bin"), 200);
    write_bytes(&dir.path().join("c.bin"), 300);

    assert_eq!(size::dir_size(dir.path()), 600);
}

#[test]
fn test_dir_size_nested() {
    let dir = TempDir::new().unwrap();
    write_bytes(&dir.path().join("root.txt"), 3);
    write_bytes(&dir.path().join("sub/deeper/nested.txt"), 5);

    assert_eq!(size::dir_size(dir.path()), 8);
}

#[test]
fn test_dir_size_empty_and_missing() {
    let dir = TempDir::new().unwrap();
    assert_eq!(size::dir_size(dir.path()), 0);
    assert_eq!(size::dir_size(Path::new("/nonexistent/path/xyz")), 0);
}

#[cfg(unix)]
#[test]
fn test_dir_size_skips_unreadable_subdirectory() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write_bytes(&dir.path().join("a.bin"), 100);
    write_bytes(&dir.path().join("b.bin"), 200);
    write_bytes(&dir.path().join("c.bin"), 300);
    let secret = dir.path().join("secret");
    write_bytes(&secret.join("hidden.bin"), 50);
    std::fs::set_permissions(&secret, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged processes can read it anyway
    let readable = std::fs::read_dir(&secret).is_ok();
    let total = size::dir_size(dir.path());
    std::fs::set_permissions(&secret, std::fs::Permissions::from_mode(0o700)).unwrap();

    if readable {
        assert_eq!(total, 650);
    } else {
        assert_eq!(total, 600);
    }
}

// ─── Catalog tests ────────────────────────────────────────────────────────────

#[test]
fn test_catalog_non_empty_for_every_platform() {
    let home = TempDir::new().unwrap();
    for platform in Platform::ALL {
        let catalog = Catalog::for_environment(&Environment::new(platform, home.path()));
        assert!(catalog.len() >= 10, "{} catalog too small", platform);
        for category in &catalog {
            assert!(!category.name.is_empty());
        }
    }
}

#[test]
fn test_catalog_is_rebuilt_from_current_environment() {
    let home = TempDir::new().unwrap();
    let first = Environment::new(Platform::Windows, home.path()).with_var("TEMP", "/scratch/one");
    let second = Environment::new(Platform::Windows, home.path()).with_var("TEMP", "/scratch/two");

    let a = Catalog::for_environment(&first);
    let b = Catalog::for_environment(&second);
    assert_eq!(a.get("User Temp Files").unwrap().paths, vec![PathBuf::from("/scratch/one")]);
    assert_eq!(b.get("User Temp Files").unwrap().paths, vec![PathBuf::from("/scratch/two")]);
}

// ─── Scan engine tests ────────────────────────────────────────────────────────

#[test]
fn test_scan_excludes_categories_without_existing_paths() {
    let root = TempDir::new().unwrap();
    write_bytes(&root.path().join("cache/a.bin"), 10);

    let catalog = Catalog::builder()
        .category("Cache", [root.path().join("cache"), root.path().join("gone")])
        .category("Missing", [root.path().join("nowhere")])
        .category("Empty Glob", Vec::<PathBuf>::new())
        .build();

    let report = scanner::scan_catalog(&catalog, Platform::Linux, &quiet());
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category, "Cache");
    assert_eq!(report.categories[0].size, 10);
    // Every candidate is listed, existing or not
    assert_eq!(report.categories[0].paths.len(), 2);
    assert_eq!(report.os, Platform::Linux);
}

#[test]
fn test_scan_sorted_descending_with_stable_ties() {
    let root = TempDir::new().unwrap();
    let r = root.path();
    write_bytes(&r.join("small/f"), 5);
    write_bytes(&r.join("big/f"), 500);
    std::fs::create_dir_all(r.join("zero_a")).unwrap();
    std::fs::create_dir_all(r.join("zero_b")).unwrap();
    write_bytes(&r.join("mid/f"), 50);

    let catalog = Catalog::builder()
        .category("Zero A", [r.join("zero_a")])
        .category("Small", [r.join("small")])
        .category("Big", [r.join("big")])
        .category("Zero B", [r.join("zero_b")])
        .category("Mid", [r.join("mid")])
        .build();

    let report = scanner::scan_catalog(&catalog, Platform::MacOs, &quiet());
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Big", "Mid", "Small", "Zero A", "Zero B"]);

    for pair in report.categories.windows(2) {
        assert!(pair[0].size >= pair[1].size);
    }
    assert_eq!(report.total, 555);
    assert_eq!(report.total_human, format::format_size(555));
}

#[test]
fn test_scan_sums_multiple_paths_per_category() {
    let root = TempDir::new().unwrap();
    write_bytes(&root.path().join("one/a"), 120);
    write_bytes(&root.path().join("two/b"), 80);

    let catalog = Catalog::builder()
        .category("Chrome Cache", [root.path().join("one"), root.path().join("two")])
        .build();

    let report = scanner::scan_catalog(&catalog, Platform::Linux, &quiet());
    assert_eq!(report.categories[0].size, 200);
    assert_eq!(report.categories[0].size_human, "200.00 B");
}

#[test]
fn test_scan_is_read_only() {
    let root = TempDir::new().unwrap();
    write_bytes(&root.path().join("cache/keep.bin"), 64);
    let catalog = Catalog::builder()
        .category("Cache", [root.path().join("cache")])
        .build();

    let first = scanner::scan_catalog(&catalog, Platform::Linux, &quiet());
    let second = scanner::scan_catalog(&catalog, Platform::Linux, &quiet());
    assert_eq!(first.categories, second.categories);
    assert!(root.path().join("cache/keep.bin").exists());
}

#[test]
fn test_scan_from_environment_with_exclusions() {
    let root = TempDir::new().unwrap();
    let r = root.path();
    let env = Environment::new(Platform::Windows, r.join("home"))
        .with_var("WINDIR", r.join("win"))
        .with_var("LOCALAPPDATA", r.join("local"))
        .with_var("APPDATA", r.join("roaming"))
        .with_var("TEMP", r.join("temp"));
    write_bytes(&r.join("temp/setup.log"), 300);
    write_bytes(&r.join("local/CrashDumps/app.dmp"), 700);
    write_bytes(&r.join("local/Mozilla/Firefox/Profiles/abc.default/cache2/entry"), 40);

    let report = scanner::scan(&env, &Config::default(), &quiet());
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Crash Dumps", "User Temp Files", "Firefox Cache"]);
    assert_eq!(report.total, 1040);
    assert_eq!(report.os, Platform::Windows);

    let config = Config {
        exclude_categories: vec!["crash dumps".into()],
        ..Config::default()
    };
    let report = scanner::scan(&env, &config, &quiet());
    assert_eq!(report.total, 340);
}

#[test]
fn test_report_json_fields() {
    let root = TempDir::new().unwrap();
    write_bytes(&root.path().join("t/a"), 1);
    let catalog = Catalog::builder().category("Temp", [root.path().join("t")]).build();

    let report = scanner::scan_catalog(&catalog, Platform::MacOs, &quiet());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["os"], "Darwin");
    assert_eq!(json["total"], 1);
    assert_eq!(json["categories"][0]["category"], "Temp");
    assert!(json["categories"][0]["size_human"].is_string());
}
