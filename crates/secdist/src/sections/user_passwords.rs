//! Username to password credentials.
//!
//! Responsibilities:
//! - Read the optional `user-passwords` object from the secdist document.
//! - Keep passwords wrapped in `SecretString` so they never reach `Debug` output.
//!
//! Invariants:
//! - A missing or `null` `user-passwords` key yields an empty section.
//! - Every value under `user-passwords` must be a string.

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde_json::Value;

use crate::section::{Section, SectionError, optional_key};

const KEY: &str = "user-passwords";

/// Passwords by username, read from `{"user-passwords": {"<user>": "<password>"}}`.
#[derive(Debug, Default)]
pub struct UserPasswords {
    passwords: BTreeMap<String, SecretString>,
}

impl UserPasswords {
    /// Password for `username`, if one is configured.
    pub fn get(&self, username: &str) -> Option<&SecretString> {
        self.passwords.get(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.passwords.contains_key(username)
    }

    /// Configured usernames in sorted order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.passwords.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

impl Section for UserPasswords {
    const NAME: &'static str = KEY;

    fn from_document(doc: &Value) -> Result<Self, SectionError> {
        let raw: BTreeMap<String, String> = optional_key(doc, KEY)?.unwrap_or_default();
        let passwords = raw
            .into_iter()
            .map(|(user, password)| (user, SecretString::new(password.into())))
            .collect();
        Ok(Self { passwords })
    }
}

crate::register_section!(UserPasswords);
