//! Sections shipped with the crate.

mod user_passwords;

pub use user_passwords::UserPasswords;
