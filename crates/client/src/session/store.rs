//! Durable session storage.
//!
//! The persisted state is a single key: one JSON document holding the
//! serialized [`Session`]. An absent record is the unauthenticated state.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Session;

/// Errors that can occur reading or writing the session record.
///
/// Callers in the Session Manager log these and degrade: a load failure is
/// "no session", a save failure leaves the in-memory session authoritative.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record is not valid JSON for a session.
    #[error("corrupt session record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable key-value storage for the session record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if any.
    async fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Persist the session, replacing any previous record.
    async fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove the persisted record. Must be idempotent.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed session store.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write can't leave a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, raw).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::session_fixture;

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn test_load_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let session = session_fixture("u-1");

        store.save(&session).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&session_fixture("u-1")).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = FileSessionStore::new(path);
        assert!(matches!(store.load().await, Err(StoreError::Corrupt(_))));
    }
}
