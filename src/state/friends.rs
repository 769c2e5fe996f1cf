//! Friend list state: records, search, sort and the add/edit form.
//!
//! DESIGN
//! ======
//! `FriendsState` lives in a `RwSignal` and is only changed through its
//! methods, so every mutation site is explicit and testable without a DOM.
//! The list is in-memory only; `load` resets it to the seed records.

#[cfg(test)]
#[path = "friends_test.rs"]
mod friends_test;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldError, ValidationErrors};
use crate::net::types::UserId;
use crate::util::{birthday, validate};

/// A contact whose birthday is tracked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub city: String,
    /// ISO `YYYY-MM-DD`.
    pub birthdate: String,
    pub user_id: UserId,
}

impl Friend {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn birthdate(&self) -> Option<NaiveDate> {
        validate::iso_date(&self.birthdate).ok()
    }

    pub fn days_until_birthday(&self, today: NaiveDate) -> Option<i64> {
        birthday::days_until(self.birthdate()?, today)
    }

    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        birthday::age_on(self.birthdate()?, today)
    }

    fn matches(&self, needle_lower: &str) -> bool {
        [&self.first_name, &self.last_name, &self.city]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// The two records every fresh list starts with.
pub fn seed_friends() -> Vec<Friend> {
    vec![
        Friend {
            id: Uuid::from_u128(1),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            phone: "0722123456".to_owned(),
            city: "Bucharest".to_owned(),
            birthdate: "1990-05-15".to_owned(),
            user_id: UserId::new("1"),
        },
        Friend {
            id: Uuid::from_u128(2),
            first_name: "Jane".to_owned(),
            last_name: "Smith".to_owned(),
            phone: "0733123456".to_owned(),
            city: "Cluj".to_owned(),
            birthdate: "1985-12-20".to_owned(),
            user_id: UserId::new("1"),
        },
    ]
}

/// Columns the list can be sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortField {
    #[default]
    FirstName,
    LastName,
    Phone,
    City,
    Birthdate,
}

impl SortField {
    pub const ALL: [Self; 5] = [Self::FirstName, Self::LastName, Self::Phone, Self::City, Self::Birthdate];

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Phone => "Phone",
            Self::City => "City",
            Self::Birthdate => "Birthdate",
        }
    }

    fn key(self, friend: &Friend) -> &str {
        match self {
            Self::FirstName => &friend.first_name,
            Self::LastName => &friend.last_name,
            Self::Phone => &friend.phone,
            Self::City => &friend.city,
            Self::Birthdate => &friend.birthdate,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Case-insensitive text ordering; locale-aware in the browser.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    #[cfg(feature = "csr")]
    {
        js_sys::JsString::from(a.as_str())
            .locale_compare(&b, &js_sys::Array::new())
            .cmp(&0)
    }
    #[cfg(not(feature = "csr"))]
    {
        a.cmp(&b)
    }
}

/// Editable fields of the friend form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    FirstName,
    LastName,
    Phone,
    City,
    Birthdate,
}

impl FormField {
    pub const ALL: [Self; 5] = [Self::FirstName, Self::LastName, Self::Phone, Self::City, Self::Birthdate];

    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::City => "city",
            Self::Birthdate => "birthdate",
        }
    }
}

/// Raw form input as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FriendFormValues {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub city: String,
    pub birthdate: String,
}

/// Form input that passed validation, trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidFriend {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub city: String,
    pub birthdate: String,
}

impl ValidFriend {
    fn into_friend(self, id: Uuid, user_id: UserId) -> Friend {
        Friend {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            city: self.city,
            birthdate: self.birthdate,
            user_id,
        }
    }
}

impl FriendFormValues {
    pub fn from_friend(friend: &Friend) -> Self {
        Self {
            first_name: friend.first_name.clone(),
            last_name: friend.last_name.clone(),
            phone: friend.phone.clone(),
            city: friend.city.clone(),
            birthdate: friend.birthdate.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Phone => &self.phone,
            FormField::City => &self.city,
            FormField::Birthdate => &self.birthdate,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Phone => &mut self.phone,
            FormField::City => &mut self.city,
            FormField::Birthdate => &mut self.birthdate,
        };
        *slot = value;
    }

    fn check(&self, field: FormField) -> Result<String, FieldError> {
        let value = self.get(field);
        match field {
            FormField::FirstName | FormField::LastName => {
                validate::min_chars(value, validate::MIN_NAME_LEN).map(str::to_owned)
            }
            FormField::Phone => validate::phone(value).map(str::to_owned),
            FormField::City => validate::required(value).map(str::to_owned),
            FormField::Birthdate => validate::iso_date(value).map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn field_error(&self, field: FormField) -> Option<FieldError> {
        self.check(field).err()
    }

    /// # Errors
    ///
    /// Returns every failing field when any check fails.
    pub fn validate(&self) -> Result<ValidFriend, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut take = |field: FormField| match self.check(field) {
            Ok(value) => value,
            Err(e) => {
                errors.add(field.name(), e);
                String::new()
            }
        };
        let valid = ValidFriend {
            first_name: take(FormField::FirstName),
            last_name: take(FormField::LastName),
            phone: take(FormField::Phone),
            city: take(FormField::City),
            birthdate: take(FormField::Birthdate),
        };
        errors.into_result(valid)
    }
}

/// Open add/edit dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FriendForm {
    pub values: FriendFormValues,
    touched: BTreeSet<FormField>,
    /// Record being edited; `None` when adding.
    editing: Option<Friend>,
}

impl FriendForm {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn touch(&mut self, field: FormField) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self) {
        self.touched.extend(FormField::ALL);
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Error to show inline; only reported once the field has been touched.
    pub fn visible_error(&self, field: FormField) -> Option<FieldError> {
        if self.is_touched(field) { self.values.field_error(field) } else { None }
    }
}

/// What `save` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(Uuid),
    Updated(Uuid),
    /// The edited record was deleted while the form was open.
    Vanished(Uuid),
    /// No form was open.
    Idle,
}

/// Friend list plus view state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FriendsState {
    friends: Vec<Friend>,
    pub search_term: String,
    pub sort: SortState,
    form: Option<FriendForm>,
}

impl FriendsState {
    /// State holding the seed records.
    pub fn seeded() -> Self {
        let mut state = Self::default();
        state.load();
        state
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn find(&self, id: Uuid) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    pub fn form(&self) -> Option<&FriendForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FriendForm> {
        self.form.as_mut()
    }

    /// Replace the collection with the seed records.
    pub fn load(&mut self) {
        self.friends = seed_friends();
    }

    /// Validate `values` and append a new record owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns the failing fields; the collection is untouched.
    pub fn add(&mut self, values: &FriendFormValues, owner: UserId) -> Result<Uuid, ValidationErrors> {
        let valid = values.validate()?;
        Ok(self.append(valid, owner))
    }

    fn append(&mut self, valid: ValidFriend, owner: UserId) -> Uuid {
        let id = Uuid::new_v4();
        self.friends.push(valid.into_friend(id, owner));
        log::debug!("added friend {id}");
        id
    }

    /// Open an empty form for a new record.
    pub fn open_add(&mut self) {
        self.form = Some(FriendForm::default());
    }

    /// Open the form pre-filled with `friend`. Nothing changes until `save`.
    pub fn edit(&mut self, friend: &Friend) {
        self.form = Some(FriendForm {
            values: FriendFormValues::from_friend(friend),
            touched: BTreeSet::new(),
            editing: Some(friend.clone()),
        });
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        if let Some(form) = self.form.as_mut() {
            form.values.set(field, value);
        }
    }

    pub fn touch_field(&mut self, field: FormField) {
        if let Some(form) = self.form.as_mut() {
            form.touch(field);
        }
    }

    /// Commit the open form: replace the edited record in place, or append.
    ///
    /// # Errors
    ///
    /// On invalid input every field is marked touched, the form stays open,
    /// and the failing fields are returned.
    pub fn save(&mut self, owner: UserId) -> Result<SaveOutcome, ValidationErrors> {
        let Some(form) = self.form.as_mut() else {
            return Ok(SaveOutcome::Idle);
        };
        let valid = match form.values.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                form.touch_all();
                return Err(errors);
            }
        };

        let outcome = if let Some(original) = form.editing.take() {
            let id = original.id;
            let updated = valid.into_friend(id, original.user_id);
            match self.friends.iter_mut().find(|f| f.id == id) {
                Some(slot) => {
                    *slot = updated;
                    SaveOutcome::Updated(id)
                }
                None => SaveOutcome::Vanished(id),
            }
        } else {
            SaveOutcome::Added(self.append(valid, owner))
        };
        self.close();
        log::debug!("friend form saved: {outcome:?}");
        Ok(outcome)
    }

    /// Discard the form.
    pub fn close(&mut self) {
        self.form = None;
    }

    /// Remove `id` if `confirm` approves. Returns whether a record was removed.
    ///
    /// Unknown ids are a no-op and do not prompt.
    pub fn delete(&mut self, id: Uuid, confirm: impl FnOnce(&Friend) -> bool) -> bool {
        let Some(index) = self.friends.iter().position(|f| f.id == id) else {
            return false;
        };
        if !confirm(&self.friends[index]) {
            return false;
        }
        self.friends.remove(index);
        true
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Same field flips direction; a new field starts ascending.
    pub fn sort_by(&mut self, field: SortField) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.flipped();
        } else {
            self.sort = SortState { field, direction: SortDirection::Asc };
        }
    }

    /// Records whose first name, last name or city contain the search term, any case.
    pub fn filtered(&self) -> Vec<&Friend> {
        let needle = self.search_term.to_lowercase();
        self.friends.iter().filter(|f| f.matches(&needle)).collect()
    }

    /// `filtered()` stably sorted by the current field and direction.
    pub fn sorted(&self) -> Vec<&Friend> {
        let SortState { field, direction } = self.sort;
        let mut rows = self.filtered();
        rows.sort_by(|a, b| {
            let ord = compare_text(field.key(a), field.key(b));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        rows
    }

    /// Number of records with a birthday within `window_days` of `today`.
    pub fn upcoming_count(&self, today: NaiveDate, window_days: i64) -> usize {
        self.friends
            .iter()
            .filter_map(Friend::birthdate)
            .filter(|b| birthday::is_upcoming(*b, today, window_days))
            .count()
    }
}
