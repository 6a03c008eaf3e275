//! Domain types: the unsaved draft, the persisted record, and validation results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Editable fields of a [`UserDraft`], in form order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Email,
    BirthDate,
}

impl UserField {
    pub const ALL: [UserField; 3] = [UserField::Name, UserField::Email, UserField::BirthDate];

    pub fn as_str(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::BirthDate => "birthDate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserField::Name => "Name *",
            UserField::Email => "Email *",
            UserField::BirthDate => "Birth date * (YYYY-MM-DD)",
        }
    }

    /// Next field, wrapping to the first.
    pub fn next(self) -> Self {
        match self {
            UserField::Name => UserField::Email,
            UserField::Email => UserField::BirthDate,
            UserField::BirthDate => UserField::Name,
        }
    }

    /// Previous field, wrapping to the last.
    pub fn prev(self) -> Self {
        match self {
            UserField::Name => UserField::BirthDate,
            UserField::Email => UserField::Name,
            UserField::BirthDate => UserField::Email,
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress user input; nothing is persisted until it is submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub birth_date: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, birth_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            birth_date: birth_date.into(),
        }
    }

    pub fn get(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
            UserField::BirthDate => &self.birth_date,
        }
    }

    pub fn get_mut(&mut self, field: UserField) -> &mut String {
        match field {
            UserField::Name => &mut self.name,
            UserField::Email => &mut self.email,
            UserField::BirthDate => &mut self.birth_date,
        }
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}

/// Body of `POST /users`. The wire uses `birth_date`.
#[derive(Debug, Serialize)]
pub struct CreateUserBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub birth_date: &'a str,
}

impl<'a> From<&'a UserDraft> for CreateUserBody<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            name: &draft.name,
            email: &draft.email,
            birth_date: &draft.birth_date,
        }
    }
}

/// A user as returned by the server, including server-assigned fields.
///
/// Kept verbatim: dates stay in their wire text form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub birth_date: String,
    pub created_at: String,
    pub age: i64,
}

/// Per-field messages; empty means the draft is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<UserField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: UserField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: UserField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop one field's message; returns whether it was set.
    pub fn clear_field(&mut self, field: UserField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// One entry of the demo data endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestDataItem {
    pub name: String,
    pub id: Option<i64>,
}

// The backend answers `/normal_function` with bare integers, while other
// deployments send `{ "name", "id" }` objects. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum TestDataWire {
    Object { name: String, id: Option<i64> },
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for TestDataItem {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match TestDataWire::deserialize(deserializer)? {
            TestDataWire::Object { name, id } => TestDataItem { name, id },
            TestDataWire::Number(n) => TestDataItem {
                name: n.to_string(),
                id: Some(n),
            },
            TestDataWire::Text(name) => TestDataItem { name, id: None },
        })
    }
}
