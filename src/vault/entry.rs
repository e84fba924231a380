//! Entry types stored in the data file.
//!
//! An `Entry` is exactly what lives on disk: the title in plaintext and
//! every other field as a hex ciphertext string.  `NewEntry` and
//! `PlainEntry` carry the same fields decrypted, for callers on the
//! other side of a `Session`.

use std::fmt;
use std::str::FromStr;

use crate::errors::SquirrelError;

/// A single stored credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Unique within the store, fixed for the record's lifetime.
    pub id: i64,

    /// Stored in plaintext so listings never need the key.
    pub title: String,

    /// Hex ciphertext.
    pub username: String,

    /// Hex ciphertext.
    pub password: String,

    /// Hex ciphertext.
    pub address: String,

    /// Hex ciphertext.
    pub notes: String,
}

impl Entry {
    /// The five string fields in on-disk order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.title,
            &self.username,
            &self.password,
            &self.address,
            &self.notes,
        ]
    }
}

/// Plaintext fields for a record that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub username: String,
    pub password: String,
    pub address: String,
    pub notes: String,
}

/// A stored record with every field decrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainEntry {
    pub id: i64,
    pub title: String,
    pub username: String,
    pub password: String,
    pub address: String,
    pub notes: String,
}

impl PlainEntry {
    /// Drop the ID, e.g. to edit a copy and store it back.
    pub fn into_new(self) -> NewEntry {
        NewEntry {
            title: self.title,
            username: self.username,
            password: self.password,
            address: self.address,
            notes: self.notes,
        }
    }
}

/// Sort key for `EntryStore::list_entries`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Byte-wise on the stored title.
    #[default]
    ByTitle,
    /// Byte-wise on the stored username field.
    ByUsername,
}

impl Order {
    pub fn key<'a>(&self, entry: &'a Entry) -> &'a str {
        match self {
            Order::ByTitle => &entry.title,
            Order::ByUsername => &entry.username,
        }
    }
}

impl FromStr for Order {
    type Err = SquirrelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Order::ByTitle),
            "username" => Ok(Order::ByUsername),
            _ => Err(SquirrelError::UnknownOrder(s.to_string())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::ByTitle => "title",
            Order::ByUsername => "username",
        })
    }
}
