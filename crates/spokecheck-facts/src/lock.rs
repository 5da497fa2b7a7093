use crate::FactsError;
use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions, TryLockError};
use std::io::{Read, Seek, Write};
use tracing::{debug, warn};

/// Exclusive OS lock for one spoke/hub pair.
///
/// The lock is held on an open file handle, so it is released when the guard drops or when
/// the holding process dies. A lock file left behind by a killed run never blocks the pair.
/// The file itself stays in the lock directory and carries the last holder's pid.
#[derive(Debug)]
pub struct PairLock {
    path: Utf8PathBuf,
    file: File,
}

/// File name of the lock for a pair: SHA-256 of the lower-cased `spoke|hub`.
pub fn lock_file_name(spoke: &str, hub: &str) -> String {
    let key = format!("{}|{}", spoke.trim(), hub.trim()).to_ascii_lowercase();
    let digest = Sha256::digest(key.as_bytes());
    format!("spokecheck-{}.lock", hex::encode(digest))
}

impl PairLock {
    pub fn acquire(dir: &Utf8Path, spoke: &str, hub: &str) -> Result<Self, FactsError> {
        std::fs::create_dir_all(dir).map_err(|source| FactsError::Io {
            context: format!("create lock dir {dir}"),
            source,
        })?;

        let path = dir.join(lock_file_name(spoke, hub));
        let io_err = |context: &str, source| FactsError::Io {
            context: format!("{context} {path}"),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| io_err("open lock", e))?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                let mut holder = String::new();
                let _ = file.read_to_string(&mut holder);
                debug!(lock = %path, holder = holder.trim(), "pair lock is held");
                return Err(FactsError::Busy { lock: path });
            }
            Err(TryLockError::Error(e)) => return Err(io_err("lock", e)),
        }

        let previous = std::fs::read_to_string(&path).unwrap_or_default();
        if !previous.trim().is_empty() {
            debug!(lock = %path, previous = previous.trim(), "reclaiming lock left by an earlier run");
        }
        file.set_len(0).map_err(|e| io_err("truncate lock", e))?;
        file.rewind().map_err(|e| io_err("rewind lock", e))?;
        writeln!(file, "{}", std::process::id()).map_err(|e| io_err("write lock", e))?;

        debug!(lock = %path, "acquired pair lock");
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Drop for PairLock {
    fn drop(&mut self) {
        match self.file.unlock() {
            Ok(()) => debug!(lock = %self.path, "released pair lock"),
            Err(err) => warn!(lock = %self.path, error = %err, "could not unlock pair lock"),
        }
    }
}
