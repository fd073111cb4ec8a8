//! Single-slot persistence for an undelivered report

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default location of the pending-report file, relative to the service's
/// working directory.
pub const DEFAULT_RETRY_FILE: &str = "last_failed_message.txt";

/// File-backed store holding at most one undelivered report text.
///
/// The file's presence is the pending flag: `save` overwrites any earlier
/// record (last failure wins) and a successful resend removes the file, so
/// the slot survives process restarts. IO errors on read degrade to
/// "nothing pending" with a log line.
#[derive(Debug, Clone)]
pub struct RetryStore {
    path: PathBuf,
}

impl RetryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `text` as the pending report, replacing any earlier one.
    pub fn save(&self, text: &str) -> Result<()> {
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// The pending report text, if any.
    pub fn pending(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!(
                    "failed to read pending report {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    /// Drop the pending report, if any.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Resend the pending report through `send`. Returns true only when a
    /// pending report existed and was delivered; on delivery failure the
    /// record stays for the next attempt.
    pub fn load_and_retry<S>(&self, mut send: S) -> bool
    where
        S: FnMut(&str) -> bool,
    {
        let Some(text) = self.pending() else {
            return false;
        };
        if send(&text) {
            if let Err(err) = self.clear() {
                log::warn!(
                    "pending report resent but {} could not be removed: {}",
                    self.path.display(),
                    err
                );
            }
            log::info!("pending report resent");
            true
        } else {
            log::error!("pending report resend failed; record kept");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> RetryStore {
        RetryStore::new(dir.path().join(DEFAULT_RETRY_FILE))
    }

    #[test]
    fn test_save_overwrites_pending() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.pending(), None);
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.pending(), Some("second".to_string()));
    }

    #[test]
    fn test_failed_retry_keeps_record() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.save("X").unwrap();

        assert!(!store.load_and_retry(|_| false));
        assert_eq!(store.pending(), Some("X".to_string()));
    }

    #[test]
    fn test_successful_retry_clears_record() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.save("X").unwrap();

        let mut sent = Vec::new();
        assert!(store.load_and_retry(|text| {
            sent.push(text.to_string());
            true
        }));
        assert_eq!(sent, vec!["X".to_string()]);
        assert_eq!(store.pending(), None);

        // Nothing pending anymore: a further retry is a no-op.
        assert!(!store.load_and_retry(|_| true));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.clear().unwrap();
        store.save("X").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.pending(), None);
    }
}
