//! Typed credentials sections built from a merged secdist document.
//!
//! Section types register a factory once per process (either with
//! [`register_section!`] next to the type or with an explicit [`register`]
//! call during startup). A [`SecdistConfig`] is then built from a JSON
//! document, loaded from a file and optionally merged with a document held in
//! an environment variable, and hands each section back by type.

mod config;
pub mod constants;
mod error;
mod loader;
mod registry;
mod section;
mod sections;

pub use config::SecdistConfig;
pub use error::{DocumentParseError, SecdistError};
pub use loader::{DocumentFormat, SecdistOptions, env_var_or_none, merge_documents};
pub use registry::{
    ErasedSection, Factory, RegisteredSection, Registry, SectionRegistration, Slot, register,
};
pub use section::{Section, SectionError, optional_key, required_key};
pub use sections::UserPasswords;

#[doc(hidden)]
pub use inventory;
