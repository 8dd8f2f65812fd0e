use std::fs;
use std::io;
use std::path::Path;

use crate::common::errors::{SweepError, SweepResult};

/// Delete a file, symlink or directory tree, clearing read-only attributes
/// where they get in the way. Never panics or propagates; the result only
/// says whether `path` is gone.
pub fn force_remove(path: &Path) -> bool {
    match try_force_remove(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("removal failed: {}", e);
            false
        }
    }
}

/// Like [`force_remove`] but reports why the removal failed.
pub fn try_force_remove(path: &Path) -> SweepResult<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| SweepError::from_io(path, e))?;

    let ft = meta.file_type();
    if ft.is_symlink() {
        remove_link(path, ft).map_err(|e| SweepError::from_io(path, e))
    } else if ft.is_dir() {
        remove_tree(path)
    } else {
        clear_readonly(path);
        fs::remove_file(path).map_err(|e| SweepError::from_io(path, e))
    }
}

/// Depth-first removal. A failing entry is retried once after clearing its
/// read-only attribute; siblings are still attempted. The first failure is
/// returned. Links are unlinked as they are, never retried.
fn remove_tree(dir: &Path) -> SweepResult<()> {
    let entries = retry_once(dir, |p| fs::read_dir(p))?;
    let mut first_err: Option<SweepError> = None;

    for entry in entries {
        let result = match entry {
            Ok(entry) => {
                let child = entry.path();
                match entry.file_type() {
                    Ok(ft) if ft.is_symlink() => {
                        remove_link(&child, ft).map_err(|e| SweepError::from_io(&child, e))
                    }
                    Ok(ft) if ft.is_dir() => remove_tree(&child),
                    Ok(_) => retry_once(&child, |p| fs::remove_file(p)),
                    Err(e) => Err(SweepError::from_io(&child, e)),
                }
            }
            Err(e) => Err(SweepError::from_io(dir, e)),
        };

        if let Err(e) = result {
            tracing::trace!("could not remove entry: {}", e);
            first_err.get_or_insert(e);
        }
    }

    match retry_once(dir, |p| fs::remove_dir(p)) {
        Ok(()) => Ok(()),
        Err(e) => Err(first_err.unwrap_or(e)),
    }
}

/// Run `op`; on a permission failure clear `path`'s read-only attribute and
/// run it again. `path` must not be a symlink.
fn retry_once<T>(path: &Path, op: impl Fn(&Path) -> io::Result<T>) -> SweepResult<T> {
    match op(path) {
        Ok(v) => Ok(v),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            clear_readonly(path);
            op(path).map_err(|e| SweepError::from_io(path, e))
        }
        Err(e) => Err(SweepError::from_io(path, e)),
    }
}

/// Unlink a symlink without touching its target.
#[cfg(windows)]
fn remove_link(path: &Path, ft: fs::FileType) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;

    // Directory links and junctions are removed like empty directories
    if ft.is_symlink_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(not(windows))]
fn remove_link(path: &Path, _ft: fs::FileType) -> io::Result<()> {
    fs::remove_file(path)
}

/// Give the owner write access. Read and search bits are left alone, so a
/// directory that cannot be opened stays unopenable. Must not be called on
/// symlinks: `set_permissions` follows them.
#[cfg(unix)]
fn clear_readonly(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.file_type().is_symlink() {
            return;
        }
        let mut perms = meta.permissions();
        if perms.mode() & 0o200 == 0 {
            perms.set_mode(perms.mode() | 0o200);
            if let Err(e) = fs::set_permissions(path, perms) {
                tracing::trace!("chmod {} failed: {}", path.display(), e);
            }
        }
    }
}

#[cfg(windows)]
fn clear_readonly(path: &Path) {
    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.file_type().is_symlink() {
            return;
        }
        let mut perms = meta.permissions();
        if perms.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            if let Err(e) = fs::set_permissions(path, perms) {
                tracing::trace!("clearing read-only on {} failed: {}", path.display(), e);
            }
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn clear_readonly(_path: &Path) {}
