use super::*;
use crate::net::types::{User, UserId};

fn signed_in() -> AuthState {
    AuthState {
        authenticated: true,
        user: Some(User {
            id: UserId::new("1"),
            email: "a@b.ro".to_owned(),
            password: "secret1".to_owned(),
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            token: "t".to_owned(),
        }),
    }
}

#[test]
fn protected_route_redirects_when_signed_out() {
    assert_eq!(
        check_route(AppRoute::Birthdays, &AuthState::default()),
        GuardDecision::Redirect(AppRoute::login())
    );
    assert!(!can_activate(&AuthState::default()));
}

#[test]
fn protected_route_allows_when_signed_in() {
    assert_eq!(check_route(AppRoute::Birthdays, &signed_in()), GuardDecision::Allow);
    assert!(can_activate(&signed_in()));
}

#[test]
fn flag_alone_is_enough() {
    let state = AuthState { authenticated: true, user: None };
    assert!(can_activate(&state));
}

#[test]
fn public_routes_always_allowed() {
    for route in [AppRoute::login(), AppRoute::Register, AppRoute::Login { registered: true }] {
        assert_eq!(check_route(route, &AuthState::default()), GuardDecision::Allow);
    }
}
