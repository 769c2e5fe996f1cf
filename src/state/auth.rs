//! Auth-session state and the service that mutates it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthService` is the only writer of session material. It keeps an
//! `AuthState` value, mirrors it into browser storage through `SessionStore`,
//! and pushes every change to subscribers synchronously. The root component
//! subscribes once and copies the state into a `RwSignal<AuthState>` context
//! read by the route guard and pages.
//!
//! STATE MACHINE
//! =============
//! Unauthenticated --login ok--> Authenticated --logout--> Unauthenticated.
//! A failed login never leaves Unauthenticated.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use super::session::{BrowserStorage, Persistence, SessionStore, StorageArea};
use crate::error::AuthError;
use crate::net::api::{HttpBackend, UserBackend};
use crate::net::types::{NewUser, Registration, User, UserId};
use crate::routes::AppRoute;

/// Snapshot of who is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<User>,
}

impl AuthState {
    fn signed_in(user: User) -> Self {
        Self { authenticated: true, user: Some(user) }
    }
}

/// Result of a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub persistence: Persistence,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.user.token
    }
}

type Observer = Rc<dyn Fn(&AuthState)>;
type Navigator = Rc<dyn Fn(AppRoute)>;

/// Service wired to the real browser storage and HTTP backend.
pub type BrowserAuthService = AuthService<HttpBackend, BrowserStorage>;

/// Login, registration and logout over a [`UserBackend`].
///
/// Clones share state, observers and the backend.
pub struct AuthService<B, S> {
    backend: Rc<B>,
    store: SessionStore<S>,
    state: Rc<RefCell<AuthState>>,
    observers: Rc<RefCell<Vec<Observer>>>,
    navigate: Navigator,
}

impl<B, S: Clone> Clone for AuthService<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            store: self.store.clone(),
            state: Rc::clone(&self.state),
            observers: Rc::clone(&self.observers),
            navigate: Rc::clone(&self.navigate),
        }
    }
}

impl<B, S> fmt::Debug for AuthService<B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("state", &self.state.borrow())
            .field("observers", &self.observers.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<B: UserBackend, S: StorageArea> AuthService<B, S> {
    /// Build the service and derive the initial state from stored session material.
    ///
    /// A token in either storage area counts as signed in.
    pub fn new(backend: B, store: SessionStore<S>, navigate: impl Fn(AppRoute) + 'static) -> Self {
        let initial = if store.has_session() {
            AuthState { authenticated: true, user: store.user() }
        } else {
            AuthState::default()
        };
        Self {
            backend: Rc::new(backend),
            store,
            state: Rc::new(RefCell::new(initial)),
            observers: Rc::new(RefCell::new(Vec::new())),
            navigate: Rc::new(navigate),
        }
    }

    /// Check credentials and start a session.
    ///
    /// On success the previous session (in either area) is replaced, observers
    /// see `authenticated = true`, and the app navigates to the home view.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` when no user matches or the match has
    /// no session token, or
    /// `AuthError::Transport` when the backend could not be reached. State is
    /// unchanged in both cases.
    pub async fn login(&self, email: &str, password: &str, remember_me: bool) -> Result<Session, AuthError> {
        let users = self.backend.find_users(email, password).await?;
        let Some(user) = users.into_iter().next() else {
            log::info!("login rejected: no matching user");
            return Err(AuthError::InvalidCredentials);
        };
        // A stored session is keyed by its token; without one it would not survive a reload.
        if user.token.is_empty() {
            log::warn!("login rejected: user {} has no session token", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let persistence = Persistence::from_remember_me(remember_me);
        if let Err(e) = self.store.save(&user, persistence) {
            // The in-memory session still works until reload.
            log::warn!("session not persisted: {e}");
        }
        log::info!("user {} signed in ({persistence:?} storage)", user.id);

        self.set_state(AuthState::signed_in(user.clone()));
        (self.navigate)(AppRoute::home());
        Ok(Session { user, persistence })
    }

    /// Create an account and send the user to the login view.
    ///
    /// # Errors
    ///
    /// `AuthError::Registration` with the backend's message when creation fails.
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let token = generate_session_token(chrono::Utc::now().timestamp_millis());
        let body = NewUser::from_registration(registration, token);
        let created = self.backend.create_user(&body).await.map_err(|e| match e {
            AuthError::Registration(message) | AuthError::Transport(message) => AuthError::Registration(message),
            AuthError::InvalidCredentials => AuthError::Registration(AuthError::InvalidCredentials.to_string()),
        })?;
        log::info!("registered user {}", created.id);
        (self.navigate)(AppRoute::Login { registered: true });
        Ok(created)
    }

    /// End the session in both storage areas and return to login.
    pub fn logout(&self) {
        self.store.clear();
        self.set_state(AuthState::default());
        log::info!("signed out");
        (self.navigate)(AppRoute::login());
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Register `observer` and call it immediately with the current state.
    pub fn subscribe(&self, observer: impl Fn(&AuthState) + 'static) {
        let observer: Observer = Rc::new(observer);
        let current = self.state();
        observer(&current);
        self.observers.borrow_mut().push(observer);
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn user_data(&self) -> Option<User> {
        self.store.user()
    }

    /// Owner id for new records; falls back to the default id when no user is cached.
    pub fn current_user_id(&self) -> UserId {
        self.user_data().map(|u| u.id).unwrap_or_default()
    }

    fn set_state(&self, next: AuthState) {
        *self.state.borrow_mut() = next.clone();
        let observers = self.observers.borrow().clone();
        for observer in observers {
            observer(&next);
        }
    }
}

/// Opaque session key: `token-<millis>-<9 base36 chars>`. Not a security token.
pub fn generate_session_token(now_millis: i64) -> String {
    format!("token-{now_millis}-{}", base36_suffix(Uuid::new_v4().as_u128(), 9))
}

fn base36_suffix(mut value: u128, len: usize) -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(char::from(ALPHABET[(value % 36) as usize]));
        value /= 36;
    }
    out
}
