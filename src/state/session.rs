//! Session material persisted in the browser's two storage areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! A session is the `authToken` + `userData` pair living in exactly one of
//! `localStorage` (remember me) or `sessionStorage` (this tab only). Writes
//! always clear both areas first so two sessions can never coexist.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::rc::Rc;

use crate::config::{TOKEN_KEY, USER_DATA_KEY};
use crate::net::types::User;

/// A write to a storage area was refused (quota, privacy mode, no window).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("storage write failed: {0}")]
pub struct StorageError(pub String);

/// Minimal string key-value store, mirroring the Web Storage API.
pub trait StorageArea {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the value could not be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// Which storage area holds the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// Survives browser restarts.
    Local,
    /// Cleared when the tab closes.
    Session,
}

impl Persistence {
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me { Self::Local } else { Self::Session }
    }
}

/// In-process storage area. Clones share the same map.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
impl StorageArea for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage` or `window.sessionStorage`.
///
/// Outside the browser (`csr` disabled) every read is empty and every write fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserStorage {
    area: Persistence,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self { area: Persistence::Local }
    }

    pub fn session() -> Self {
        Self { area: Persistence::Session }
    }

    #[cfg(feature = "csr")]
    fn storage(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            Persistence::Local => window.local_storage(),
            Persistence::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

impl StorageArea for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            self.storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = self
                .storage()
                .ok_or_else(|| StorageError(format!("{:?} storage unavailable", self.area)))?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError("not available outside the browser".to_owned()))
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = self.storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Reads and writes session material across both storage areas.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    local: S,
    session: S,
}

impl SessionStore<BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage::local(), BrowserStorage::session())
    }
}

impl<S: StorageArea> SessionStore<S> {
    pub fn new(local: S, session: S) -> Self {
        Self { local, session }
    }

    fn area(&self, persistence: Persistence) -> &S {
        match persistence {
            Persistence::Local => &self.local,
            Persistence::Session => &self.session,
        }
    }

    /// Replace any stored session with `user`'s token and cached record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the chosen area refused the write. Both
    /// areas are left empty in that case.
    pub fn save(&self, user: &User, persistence: Persistence) -> Result<(), StorageError> {
        self.clear();
        let user_json = serde_json::to_string(user).map_err(|e| StorageError(e.to_string()))?;
        let area = self.area(persistence);
        let written = area
            .set(TOKEN_KEY, &user.token)
            .and_then(|()| area.set(USER_DATA_KEY, &user_json));
        if written.is_err() {
            self.clear();
        }
        written
    }

    /// Remove token and user data from both areas.
    pub fn clear(&self) {
        for area in [&self.local, &self.session] {
            area.remove(TOKEN_KEY);
            area.remove(USER_DATA_KEY);
        }
    }

    /// Stored token, preferring the persistent area.
    pub fn token(&self) -> Option<String> {
        non_empty(self.local.get(TOKEN_KEY)).or_else(|| non_empty(self.session.get(TOKEN_KEY)))
    }

    pub fn has_session(&self) -> bool {
        self.token().is_some()
    }

    /// Cached user record, preferring the persistent area. Unparseable data reads as absent.
    pub fn user(&self) -> Option<User> {
        let raw = non_empty(self.local.get(USER_DATA_KEY)).or_else(|| non_empty(self.session.get(USER_DATA_KEY)))?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("discarding unreadable cached user data: {e}");
                None
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
