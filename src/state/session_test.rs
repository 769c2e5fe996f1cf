use super::*;
use crate::net::types::UserId;

fn user(token: &str) -> User {
    User {
        id: UserId::new("4"),
        email: "ana@example.com".to_owned(),
        password: "secret1".to_owned(),
        first_name: "Ana".to_owned(),
        last_name: "Pop".to_owned(),
        token: token.to_owned(),
    }
}

fn store() -> (SessionStore<MemoryStorage>, MemoryStorage, MemoryStorage) {
    let local = MemoryStorage::new();
    let session = MemoryStorage::new();
    (SessionStore::new(local.clone(), session.clone()), local, session)
}

/// Storage area that refuses every write.
struct FullStorage;

impl StorageArea for FullStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError("quota exceeded".to_owned()))
    }

    fn remove(&self, _key: &str) {}
}

// =============================================================
// save
// =============================================================

#[test]
fn save_remember_me_writes_local_only() {
    let (store, local, session) = store();
    store.save(&user("t-1"), Persistence::Local).unwrap();
    assert_eq!(local.get(TOKEN_KEY).as_deref(), Some("t-1"));
    assert!(local.get(USER_DATA_KEY).is_some());
    assert!(session.is_empty());
}

#[test]
fn save_without_remember_me_writes_session_only() {
    let (store, local, session) = store();
    store.save(&user("t-2"), Persistence::Session).unwrap();
    assert!(local.is_empty());
    assert_eq!(session.get(TOKEN_KEY).as_deref(), Some("t-2"));
}

#[test]
fn save_clears_the_other_area() {
    let (store, local, session) = store();
    store.save(&user("old"), Persistence::Local).unwrap();
    store.save(&user("new"), Persistence::Session).unwrap();
    assert!(local.is_empty());
    assert_eq!(session.get(TOKEN_KEY).as_deref(), Some("new"));
}

#[test]
fn failed_save_leaves_no_session() {
    let store = SessionStore::new(FullStorage, FullStorage);
    let err = store.save(&user("t"), Persistence::Local).unwrap_err();
    assert_eq!(err, StorageError("quota exceeded".to_owned()));
    assert!(!store.has_session());
}

// =============================================================
// reads
// =============================================================

#[test]
fn token_prefers_local_area() {
    let (store, local, session) = store();
    session.set(TOKEN_KEY, "from-session").unwrap();
    assert_eq!(store.token().as_deref(), Some("from-session"));
    local.set(TOKEN_KEY, "from-local").unwrap();
    assert_eq!(store.token().as_deref(), Some("from-local"));
}

#[test]
fn empty_token_counts_as_absent() {
    let (store, local, _session) = store();
    local.set(TOKEN_KEY, "").unwrap();
    assert!(store.token().is_none());
    assert!(!store.has_session());
}

#[test]
fn user_round_trips_through_storage() {
    let (store, _local, _session) = store();
    store.save(&user("t-3"), Persistence::Session).unwrap();
    assert_eq!(store.user(), Some(user("t-3")));
}

#[test]
fn corrupt_user_data_reads_as_absent() {
    let (store, local, _session) = store();
    local.set(USER_DATA_KEY, "{not json").unwrap();
    assert!(store.user().is_none());
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_empties_both_areas() {
    let (store, local, session) = store();
    local.set(TOKEN_KEY, "a").unwrap();
    session.set(TOKEN_KEY, "b").unwrap();
    session.set(USER_DATA_KEY, "{}").unwrap();
    store.clear();
    assert!(local.is_empty());
    assert!(session.is_empty());
    assert!(!store.has_session());
}

#[test]
fn persistence_from_remember_me() {
    assert_eq!(Persistence::from_remember_me(true), Persistence::Local);
    assert_eq!(Persistence::from_remember_me(false), Persistence::Session);
}
