use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::auth::{Session, SESSION_KEY};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value storage standing in for the browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Key-value store persisted as one JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Explicit session handle passed to the pages that need it. `login` and
/// `logout` are the only writers; pages only read.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(FileStore::new(config.session_file.clone())))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn login(&self, session: &Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &raw)?;
        info!("Session stored for {}", session.display_name());
        Ok(())
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    /// Whether anything is stored under the session key. Chooses the page chrome.
    pub fn has_stored_session(&self) -> bool {
        match self.store.get(SESSION_KEY) {
            Ok(raw) => raw.is_some_and(|raw| !raw.trim().is_empty()),
            Err(e) => {
                warn!("Could not read session store: {}", e);
                false
            }
        }
    }

    /// The stored session, if readable. Unreadable or corrupt entries count as
    /// no session.
    pub fn current(&self) -> Option<Session> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read session store: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Stored session is corrupt, ignoring it: {}", e);
                None
            }
        }
    }

    pub fn bearer_token(&self) -> Option<String> {
        let token = self.current()?.bearer_token().map(str::to_string);
        if token.is_none() {
            debug!("Stored session has no bearer token");
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_models::auth::UserIdentity;

    fn ana() -> Session {
        Session::new(
            UserIdentity {
                id: Some(1),
                name: Some("Ana".to_string()),
                email: Some("ana@example.com".to_string()),
            },
            "token-123",
        )
    }

    #[test]
    fn test_login_then_logout_in_memory() {
        let context = SessionContext::in_memory();
        assert!(context.current().is_none());
        assert!(!context.has_stored_session());

        context.login(&ana()).unwrap();
        assert_eq!(context.current(), Some(ana()));
        assert_eq!(context.bearer_token().as_deref(), Some("token-123"));

        context.logout().unwrap();
        assert!(context.current().is_none());
        assert!(context.bearer_token().is_none());
    }

    #[test]
    fn test_corrupt_session_reads_as_absent_but_still_counts_for_layout() {
        let store = Arc::new(MemoryStore::new());
        store.set(SESSION_KEY, "{not json").unwrap();
        let context = SessionContext::new(store);

        assert!(context.has_stored_session());
        assert!(context.current().is_none());
        assert!(context.bearer_token().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        SessionContext::new(Arc::new(FileStore::new(&path))).login(&ana()).unwrap();

        let reopened = SessionContext::new(Arc::new(FileStore::new(&path)));
        assert_eq!(reopened.current(), Some(ana()));

        reopened.logout().unwrap();
        assert!(SessionContext::new(Arc::new(FileStore::new(&path))).current().is_none());
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        store.set("theme", "dark").unwrap();
        store.set(SESSION_KEY, "{}").unwrap();
        store.remove(SESSION_KEY).unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();

        assert_matches!(FileStore::new(&path).get(SESSION_KEY), Err(SessionError::Serialization(_)));
    }
}
