use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::config::TOKEN_KEY;
use crate::net::api::MemoryBackend;
use crate::state::session::MemoryStorage;

const EMAIL: &str = "ana@example.com";
const PASSWORD: &str = "secret1";

fn seeded_user() -> User {
    User {
        id: UserId::new("7"),
        email: EMAIL.to_owned(),
        password: PASSWORD.to_owned(),
        first_name: "Ana".to_owned(),
        last_name: "Pop".to_owned(),
        token: "token-seeded".to_owned(),
    }
}

struct Harness {
    service: AuthService<MemoryBackend, MemoryStorage>,
    local: MemoryStorage,
    session: MemoryStorage,
    routes: Rc<RefCell<Vec<AppRoute>>>,
}

fn harness_with(local: MemoryStorage, session: MemoryStorage) -> Harness {
    let routes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&routes);
    let service = AuthService::new(
        MemoryBackend::with_users(vec![seeded_user()]),
        SessionStore::new(local.clone(), session.clone()),
        move |route| sink.borrow_mut().push(route),
    );
    Harness { service, local, session, routes }
}

fn harness() -> Harness {
    harness_with(MemoryStorage::new(), MemoryStorage::new())
}

fn registration() -> Registration {
    Registration {
        email: "new@example.com".to_owned(),
        password: "hunter22".to_owned(),
        first_name: "Ion".to_owned(),
        last_name: "Ionescu".to_owned(),
    }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_signed_out() {
    let state = AuthState::default();
    assert!(!state.authenticated);
    assert!(state.user.is_none());
}

#[test]
fn fresh_service_is_unauthenticated() {
    let h = harness();
    assert!(!h.service.is_authenticated());
    assert!(h.service.token().is_none());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_with_unknown_credentials_fails() {
    let h = harness();
    let result = block_on(h.service.login(EMAIL, "wrong-pass", true));
    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert!(!h.service.is_authenticated());
    assert!(h.local.is_empty());
    assert!(h.session.is_empty());
    assert!(h.routes.borrow().is_empty());
}

#[test]
fn login_rejects_user_without_token() {
    let mut tokenless = seeded_user();
    tokenless.token = String::new();
    let local = MemoryStorage::new();
    let routes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&routes);
    let service = AuthService::new(
        MemoryBackend::with_users(vec![tokenless]),
        SessionStore::new(local.clone(), MemoryStorage::new()),
        move |route| sink.borrow_mut().push(route),
    );

    let result = block_on(service.login(EMAIL, PASSWORD, true));
    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert!(!service.is_authenticated());
    assert!(local.is_empty());
    assert!(routes.borrow().is_empty());

    let reloaded = harness_with(local, MemoryStorage::new());
    assert_eq!(reloaded.service.is_authenticated(), service.is_authenticated());
}

#[test]
fn login_is_case_sensitive() {
    let h = harness();
    let result = block_on(h.service.login("ANA@example.com", PASSWORD, false));
    assert_eq!(result, Err(AuthError::InvalidCredentials));
}

#[test]
fn login_remember_me_persists_across_reload() {
    let h = harness();
    let session = block_on(h.service.login(EMAIL, PASSWORD, true)).unwrap();
    assert_eq!(session.token(), "token-seeded");
    assert_eq!(session.persistence, Persistence::Local);
    assert_eq!(h.service.token().as_deref(), Some("token-seeded"));
    assert_eq!(*h.routes.borrow(), vec![AppRoute::home()]);

    // Browser restart: local storage survives, session storage does not.
    let reloaded = harness_with(h.local.clone(), MemoryStorage::new());
    assert!(reloaded.service.is_authenticated());
    assert_eq!(reloaded.service.token().as_deref(), Some("token-seeded"));
    assert_eq!(reloaded.service.user_data(), Some(seeded_user()));
}

#[test]
fn login_without_remember_me_ends_with_the_tab() {
    let h = harness();
    block_on(h.service.login(EMAIL, PASSWORD, false)).unwrap();
    assert!(h.local.is_empty());
    assert_eq!(h.service.token().as_deref(), Some("token-seeded"));

    // Same tab reload keeps the session storage area.
    let same_tab = harness_with(MemoryStorage::new(), h.session.clone());
    assert!(same_tab.service.is_authenticated());

    // New tab: session storage is gone.
    let new_tab = harness_with(h.local.clone(), MemoryStorage::new());
    assert!(!new_tab.service.is_authenticated());
    assert!(new_tab.service.token().is_none());
}

#[test]
fn login_replaces_session_in_other_area() {
    let h = harness();
    h.local.set(TOKEN_KEY, "stale").unwrap();
    block_on(h.service.login(EMAIL, PASSWORD, false)).unwrap();
    assert!(h.local.get(TOKEN_KEY).is_none());
    assert_eq!(h.session.get(TOKEN_KEY).as_deref(), Some("token-seeded"));
}

#[test]
fn login_transport_failure_keeps_state() {
    let h = harness();
    h.service.backend.fail_with(AuthError::Transport("offline".to_owned()));
    let result = block_on(h.service.login(EMAIL, PASSWORD, true));
    assert_eq!(result, Err(AuthError::Transport("offline".to_owned())));
    assert!(!h.service.is_authenticated());
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_both_areas() {
    for remember_me in [true, false] {
        let h = harness();
        block_on(h.service.login(EMAIL, PASSWORD, remember_me)).unwrap();
        h.service.logout();
        assert!(h.service.token().is_none());
        assert!(h.service.user_data().is_none());
        assert!(!h.service.is_authenticated());
        assert_eq!(h.routes.borrow().last(), Some(&AppRoute::login()));
    }
}

#[test]
fn logout_without_session_is_harmless() {
    let h = harness();
    h.service.logout();
    assert!(!h.service.is_authenticated());
    assert_eq!(*h.routes.borrow(), vec![AppRoute::login()]);
}

// =============================================================
// startup check
// =============================================================

#[test]
fn startup_sees_session_area_token() {
    let session = MemoryStorage::new();
    session.set(TOKEN_KEY, "tab-token").unwrap();
    let h = harness_with(MemoryStorage::new(), session);
    assert!(h.service.is_authenticated());
    assert!(h.service.state().user.is_none());
}

// =============================================================
// subscribe
// =============================================================

#[test]
fn subscribers_see_current_value_then_every_change() {
    let h = harness();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    h.service.subscribe(move |state| sink.borrow_mut().push(state.authenticated));

    let _ = block_on(h.service.login(EMAIL, "nope", false));
    block_on(h.service.login(EMAIL, PASSWORD, false)).unwrap();
    h.service.logout();

    assert_eq!(*seen.borrow(), vec![false, true, false]);
}

#[test]
fn clones_share_state() {
    let h = harness();
    let other = h.service.clone();
    block_on(h.service.login(EMAIL, PASSWORD, true)).unwrap();
    assert!(other.is_authenticated());
    assert_eq!(other.state().user.map(|u| u.id), Some(UserId::new("7")));
}

// =============================================================
// register
// =============================================================

#[test]
fn register_creates_user_and_redirects_to_login() {
    let h = harness();
    let user = block_on(h.service.register(registration())).unwrap();
    assert_eq!(user.id, UserId::new("8"));
    assert!(user.token.starts_with("token-"));
    assert_eq!(*h.routes.borrow(), vec![AppRoute::Login { registered: true }]);
    assert!(!h.service.is_authenticated());

    let session = block_on(h.service.login("new@example.com", "hunter22", false)).unwrap();
    assert_eq!(session.token(), user.token);
}

#[test]
fn register_failure_carries_backend_message() {
    let h = harness();
    h.service.backend.fail_with(AuthError::Registration("email taken".to_owned()));
    let err = block_on(h.service.register(registration())).unwrap_err();
    assert_eq!(err.to_string(), "Registration failed: email taken");
    assert!(h.routes.borrow().is_empty());
}

#[test]
fn register_transport_failure_becomes_registration_error() {
    let h = harness();
    h.service.backend.fail_with(AuthError::Transport("connection refused".to_owned()));
    let err = block_on(h.service.register(registration())).unwrap_err();
    assert_eq!(err, AuthError::Registration("connection refused".to_owned()));
}

// =============================================================
// current_user_id
// =============================================================

#[test]
fn current_user_id_defaults_to_one() {
    let h = harness();
    assert_eq!(h.service.current_user_id(), UserId::new("1"));
    block_on(h.service.login(EMAIL, PASSWORD, false)).unwrap();
    assert_eq!(h.service.current_user_id(), UserId::new("7"));
}

// =============================================================
// generate_session_token
// =============================================================

#[test]
fn session_token_format() {
    let token = generate_session_token(1_700_000_000_000);
    let suffix = token.strip_prefix("token-1700000000000-").unwrap();
    assert_eq!(suffix.len(), 9);
    assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn session_tokens_differ() {
    assert_ne!(generate_session_token(1), generate_session_token(1));
}

#[test]
fn base36_suffix_encodes_low_digits_first() {
    assert_eq!(base36_suffix(0, 3), "000");
    assert_eq!(base36_suffix(35, 2), "z0");
    assert_eq!(base36_suffix(36, 2), "01");
}
