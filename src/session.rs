//! Session Guard
//!
//! The one piece of client-owned state: the signed-in user record. A
//! [`Session`] is created once at startup over a [`SessionStore`] and is
//! only changed through [`Session::login`] and [`Session::logout`].
//!
//! The record is a cache of "who signed in". It has no expiry and no
//! integrity check.

use std::cell::RefCell;
#[cfg(feature = "native")]
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::User;
use crate::shell::Route;

/// Key the browser front-end stores the record under
pub const SESSION_KEY: &str = "userData";

/// Persistence for the serialized user record
pub trait SessionStore {
    fn load(&self) -> Result<Option<String>, SessionError>;
    fn save(&self, record: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session storage errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What the dashboard may show about the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub email: String,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role.clone(),
            email: user.email.clone(),
        }
    }
}

/// Result of checking the session before showing a protected page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Allow(Profile),
    Redirect(Route),
}

/// The signed-in user, backed by a store
pub struct Session<S: SessionStore> {
    store: S,
    user: Option<User>,
}

impl<S: SessionStore> Session<S> {
    /// Read the persisted record. A missing, unreadable or corrupt record
    /// leaves the session signed out.
    pub fn open(store: S) -> Self {
        let user = match store.load() {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring corrupt session record");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session record");
                None
            }
        };

        Self { store, user }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Gate for protected pages. No return-to-page is remembered.
    pub fn guard(&self) -> Guard {
        match &self.user {
            Some(user) => Guard::Allow(Profile::from(user)),
            None => Guard::Redirect(Route::SignIn),
        }
    }

    /// Persist the user returned by sign-in
    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        let record = serde_json::to_string(&user)?;
        self.store.save(&record)?;
        tracing::info!(email = %user.email, "Signed in");
        self.user = Some(user);
        Ok(())
    }

    /// Forget the user locally and send them to sign-in. No server call.
    pub fn logout(&mut self) -> Result<Route, SessionError> {
        self.user = None;
        self.store.clear()?;
        tracing::info!("Signed out");
        Ok(Route::SignIn)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Process-lifetime store, used by tests and ephemeral front-ends
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: RefCell::new(Some(record.into())),
        }
    }

    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.record.borrow().clone())
    }

    fn save(&self, record: &str) -> Result<(), SessionError> {
        *self.record.borrow_mut() = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.record.borrow_mut() = None;
        Ok(())
    }
}

/// JSON file holding the record, the terminal's stand-in for `localStorage`
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(feature = "native")]
impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "native")]
impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, record: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, record)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_empty_store_redirects() {
        let session = Session::open(MemoryStore::new());
        assert!(!session.is_signed_in());
        assert_eq!(session.guard(), Guard::Redirect(Route::SignIn));
    }

    #[test]
    fn test_login_exposes_profile_and_persists() {
        let mut session = Session::open(MemoryStore::new());
        session.login(ana()).unwrap();

        assert_eq!(
            session.guard(),
            Guard::Allow(Profile {
                name: "Ana".to_string(),
                role: "admin".to_string(),
                email: "ana@x.com".to_string(),
            })
        );

        let stored: User = serde_json::from_str(&session.store().record().unwrap()).unwrap();
        assert_eq!(stored, ana());
    }

    #[test]
    fn test_open_reads_existing_record() {
        let store = MemoryStore::with_record(
            r#"{"_id":"u1","name":"Ana","email":"ana@x.com","role":"admin"}"#,
        );
        let session = Session::open(store);
        assert_eq!(session.user(), Some(&ana()));
    }

    #[test]
    fn test_corrupt_record_is_signed_out() {
        let session = Session::open(MemoryStore::with_record("{not json"));
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_logout_clears_record() {
        let mut session = Session::open(MemoryStore::new());
        session.login(ana()).unwrap();

        assert_eq!(session.logout().unwrap(), Route::SignIn);
        assert!(session.store().record().is_none());
        assert_eq!(session.guard(), Guard::Redirect(Route::SignIn));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().unwrap().is_none());
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_backed_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::open(FileStore::new(&path));
        session.login(ana()).unwrap();
        drop(session);

        let reopened = Session::open(FileStore::new(&path));
        assert_eq!(reopened.user().map(|u| u.name.as_str()), Some("Ana"));
    }
}
