//! User records.
//!
//! The upstream API stores passwords in plaintext on the user record. That
//! is a property of the remote service, not something this client adds; the
//! field is carried verbatim so full-record updates round-trip.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::UserId;

/// Structured name sub-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

/// Structured address sub-record.
///
/// The upstream returns `number` as a bare JSON number on seeded records but
/// accepts strings on writes, so it is held as a string and decoded from
/// either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    pub city: String,
    pub street: String,
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    pub zipcode: String,
}

/// Accept either a JSON string or a JSON number, normalizing to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Numeric(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Numeric(n) => n.to_string(),
    })
}

/// A user record as returned by the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

/// A user draft for create calls (no identifier yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

impl NewUser {
    /// Attach an identifier, turning the draft into a full record for a
    /// replace call.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            username: self.username,
            password: self.password,
            name: self.name,
            address: self.address,
            phone: self.phone,
        }
    }
}

impl From<User> for NewUser {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            username: user.username,
            password: user.password,
            name: user.name,
            address: user.address,
            phone: user.phone,
        }
    }
}
