//! Pure helpers behind the pages: field validators, birthday date math, and
//! the route guard decision. Only `guard` touches Leptos.

pub mod birthday;
pub mod guard;
pub mod validate;
