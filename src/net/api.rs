//! REST access to the user record service.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: the HTTP backend reports itself unavailable, and tests use
//! the in-memory `MemoryBackend` instead.
//!
//! ERROR HANDLING
//! ==============
//! Lookups map every failure to `AuthError::Transport`. Creation maps every
//! failure to `AuthError::Registration`, preferring the service's own
//! `message` field when it sent one.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(test)]
use std::cell::{Cell, RefCell};

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

#[cfg(any(test, feature = "csr"))]
use super::types::ErrorBody;
#[cfg(test)]
use super::types::UserId;
use super::types::{NewUser, User};
use crate::config::AppConfig;
use crate::error::AuthError;
use crate::state::session::{BrowserStorage, SessionStore};

/// Record-style user service consumed by the auth flow.
#[allow(async_fn_in_trait)]
pub trait UserBackend {
    /// All users whose email and password match exactly.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Transport` if the service could not be queried.
    async fn find_users(&self, email: &str, password: &str) -> Result<Vec<User>, AuthError>;

    /// Create a user; the service assigns its id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Registration` if the service rejected the record.
    async fn create_user(&self, user: &NewUser) -> Result<User, AuthError>;
}

fn login_lookup_url(users_url: &str, email: &str, password: &str) -> String {
    format!(
        "{users_url}?email={}&password={}",
        utf8_percent_encode(email, NON_ALPHANUMERIC),
        utf8_percent_encode(password, NON_ALPHANUMERIC),
    )
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "csr"))]
fn lookup_failed_message(status: u16) -> String {
    format!("user lookup failed: {status}")
}

#[cfg(any(test, feature = "csr"))]
fn registration_failure(status: u16, body: Option<ErrorBody>) -> AuthError {
    let message = body
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("server responded with status {status}"));
    AuthError::Registration(message)
}

/// HTTP backend talking to `{api_base_url}/users`.
///
/// Attaches `Authorization: Bearer <token>` whenever a session token is stored.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    config: AppConfig,
    session: SessionStore<BrowserStorage>,
}

impl HttpBackend {
    pub fn new(config: AppConfig, session: SessionStore<BrowserStorage>) -> Self {
        Self { config, session }
    }

    fn authorization(&self) -> Option<String> {
        self.session.token().map(|token| bearer_header(&token))
    }
}

impl UserBackend for HttpBackend {
    async fn find_users(&self, email: &str, password: &str) -> Result<Vec<User>, AuthError> {
        let url = login_lookup_url(&self.config.users_url(), email, password);
        #[cfg(feature = "csr")]
        {
            let mut request = gloo_net::http::Request::get(&url);
            if let Some(auth) = self.authorization() {
                request = request.header("Authorization", &auth);
            }
            let resp = request.send().await.map_err(|e| AuthError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(AuthError::Transport(lookup_failed_message(resp.status())));
            }
            resp.json::<Vec<User>>().await.map_err(|e| AuthError::Transport(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, self.authorization());
            Err(AuthError::Transport("not available outside the browser".to_owned()))
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, AuthError> {
        let url = self.config.users_url();
        #[cfg(feature = "csr")]
        {
            let mut request = gloo_net::http::Request::post(&url);
            if let Some(auth) = self.authorization() {
                request = request.header("Authorization", &auth);
            }
            let resp = request
                .json(user)
                .map_err(|e| AuthError::Registration(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Registration(e.to_string()))?;
            if !resp.ok() {
                let body = resp.json::<ErrorBody>().await.ok();
                return Err(registration_failure(resp.status(), body));
            }
            resp.json::<User>().await.map_err(|e| AuthError::Registration(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, user);
            Err(AuthError::Registration("not available outside the browser".to_owned()))
        }
    }
}

/// In-memory user store with sequential numeric ids.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryBackend {
    users: RefCell<Vec<User>>,
    next_id: Cell<u64>,
    failure: RefCell<Option<AuthError>>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self { next_id: Cell::new(1), ..Self::default() }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let next = users
            .iter()
            .filter_map(|u| u.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self { users: RefCell::new(users), next_id: Cell::new(next), failure: RefCell::new(None) }
    }

    /// Make every following call fail with `error`, until [`Self::recover`].
    pub fn fail_with(&self, error: AuthError) {
        *self.failure.borrow_mut() = Some(error);
    }

    pub fn recover(&self) {
        self.failure.borrow_mut().take();
    }

    pub fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    fn check_failure(&self) -> Result<(), AuthError> {
        match self.failure.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
impl UserBackend for MemoryBackend {
    async fn find_users(&self, email: &str, password: &str) -> Result<Vec<User>, AuthError> {
        self.check_failure()?;
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|u| u.email == email && u.password == password)
            .cloned()
            .collect())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, AuthError> {
        self.check_failure()?;
        let id = self.next_id.get().max(1);
        self.next_id.set(id + 1);
        let created = user.clone().into_user(UserId::new(id.to_string()));
        self.users.borrow_mut().push(created.clone());
        Ok(created)
    }
}
