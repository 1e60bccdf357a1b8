use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;
use crate::types::NonceRecord;

/// Writes each record's hex nonce to `<dir>/n-<index>`, readable by the owner only.
#[derive(Debug, Clone)]
pub struct NonceWriter {
    dir: PathBuf,
}

impl NonceWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, record: &NonceRecord) -> PathBuf {
        self.dir.join(record.file_name())
    }

    /// Persist one record, replacing any previous file of the same name.
    ///
    /// Failures are per file; callers keep going with the next record.
    pub fn write(&self, record: &NonceRecord) -> Result<PathBuf, Error> {
        let path = self.path_for(record);
        write_owner_only(&path, record.nonce.as_bytes()).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        debug!(index = record.index, path = %path.display(), "wrote nonce file");
        Ok(path)
    }
}

fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = open_owner_only(path)?;
    restrict_permissions(&file)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// `mode` only applies on creation; tighten files that already existed.
#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}
