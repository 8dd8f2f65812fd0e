use std::path::Path;
use walkdir::WalkDir;

/// Total logical size of everything under `path`, in bytes.
///
/// Symlinks below the root are not followed and contribute nothing. A root
/// that is itself a symlink is resolved, so `/tmp -> /private/tmp` is
/// measured. Unreadable entries are skipped, which makes the result a lower
/// bound rather than an error.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::trace!("size walk skipped entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().map(|m| m.len()).unwrap_or(0))
        .sum()
}

/// Size an entry is expected to free when removed: the tree size for a
/// directory, the length for a file, zero for symlinks and anything unreadable.
pub fn entry_size(path: &Path) -> u64 {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => dir_size(path),
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => 0,
        Err(err) => {
            tracing::trace!("cannot stat {}: {}", path.display(), err);
            0
        }
    }
}
