//! Networking modules for the user record service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the backend seam and its HTTP/in-memory implementations, and
//! `types` defines the shared wire schema.

pub mod api;
pub mod types;
