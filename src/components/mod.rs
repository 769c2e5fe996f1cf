//! Friend list table and the add/edit dialog.

pub mod friend_dialog;
pub mod friend_table;
