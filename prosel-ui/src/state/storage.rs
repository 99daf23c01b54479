//! Browser Session Store
//!
//! Keeps the signed-in user record in `localStorage` under `userData`.

use prosel::session::{SessionError, SessionStore, SESSION_KEY};

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| SessionError::Unavailable("localStorage disabled".to_string()))
    }
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        self.storage()?
            .get_item(SESSION_KEY)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn save(&self, record: &str) -> Result<(), SessionError> {
        self.storage()?
            .set_item(SESSION_KEY, record)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.storage()?
            .remove_item(SESSION_KEY)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }
}
