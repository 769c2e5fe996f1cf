//! Route guard for views that require a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router consults `check_route` before rendering a protected view, and
//! protected pages also install `install_unauth_redirect` so a logout in
//! another place bounces them back to login.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::AppRoute;
use crate::state::auth::AuthState;

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

/// Allow unprotected routes always; protected routes only when authenticated.
pub fn check_route(route: AppRoute, state: &AuthState) -> GuardDecision {
    if !route.is_protected() || state.authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(AppRoute::login())
    }
}

/// `true` when the protected home view may be entered.
pub fn can_activate(state: &AuthState) -> bool {
    check_route(AppRoute::home(), state) == GuardDecision::Allow
}

/// Redirect to `/login` whenever the auth state drops to unauthenticated.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(route) = check_route(AppRoute::home(), &auth.get()) {
            navigate(&route.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
