use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::storage::StorageResult;

/// Read the whole file, or `None` if it does not exist.
///
/// Every other I/O failure is returned to the caller.
pub fn read_if_exists<P: AsRef<Path>>(path: P) -> StorageResult<Option<Vec<u8>>> {
    match fs::read(path.as_ref()) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} does not exist yet, treating as empty", path.as_ref().display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Write `bytes` to a sibling temporary file and rename it over `path`.
///
/// Readers see either the previous contents or the new ones, never a partial
/// file. A power loss between the write and the rename is not covered.
pub fn atomic_write<P: AsRef<Path>>(path: P, bytes: &[u8], create_dirs: bool) -> StorageResult<()> {
    let path = path.as_ref();

    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("dat");
    path.with_extension(format!("{ext}.tmp"))
}
