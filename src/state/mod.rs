//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so views depend on small focused models:
//! `session` is storage plumbing, `auth` owns sign-in state, and `friends`
//! owns the reminder list.

pub mod auth;
pub mod friends;
pub mod session;
