//! Application route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and the auth service navigate by `AppRoute` rather than raw strings
//! so the guard and redirect rules live in one place.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Query parameter set on the login URL after a successful registration.
pub const REGISTERED_PARAM: &str = "registered";

/// A navigable view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Sign-in form. `registered` shows the post-registration banner.
    Login { registered: bool },
    Register,
    /// Friend list; requires an authenticated session.
    Birthdays,
}

impl AppRoute {
    pub const fn login() -> Self {
        Self::Login { registered: false }
    }

    /// Protected view entered after a successful login.
    pub const fn home() -> Self {
        Self::Birthdays
    }

    /// Target for the root path and every unmatched path.
    pub const fn fallback() -> Self {
        Self::login()
    }

    /// Router segment the view is mounted on.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register => "register",
            Self::Birthdays => "birthdays",
        }
    }

    pub fn path(self) -> String {
        match self {
            Self::Login { registered: true } => format!("/{}?{REGISTERED_PARAM}=true", self.segment()),
            _ => format!("/{}", self.segment()),
        }
    }

    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Birthdays)
    }
}
