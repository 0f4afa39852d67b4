//! The built secdist configuration.
//!
//! Responsibilities:
//! - Run every registered factory against one document, in slot order.
//! - Hold the resulting sections and hand them back by type or by slot.
//!
//! Does NOT handle:
//! - Slot assignment (see `registry.rs`).
//! - Reading files or the environment (see `loader`).
//!
//! Invariants:
//! - Slot `i` holds the value produced by the factory registered at index `i`.
//! - Construction is all-or-nothing: the first failing factory aborts it.
//! - A built config never changes and never touches the registry lock again.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::SecdistError;
use crate::loader::SecdistOptions;
use crate::registry::{ErasedSection, Registry, Slot};

struct StoredSection {
    type_id: TypeId,
    name: &'static str,
    value: ErasedSection,
}

/// Immutable set of credentials sections, one per registered section type.
///
/// ```rust
/// use secdist::{Registry, SecdistConfig, Section, SectionError, required_key};
/// use serde_json::{Value, json};
///
/// struct MongoUri(String);
///
/// impl Section for MongoUri {
///     const NAME: &'static str = "mongo";
///
///     fn from_document(doc: &Value) -> Result<Self, SectionError> {
///         required_key(doc, "mongo-uri").map(Self)
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register::<MongoUri>();
///
/// let config = SecdistConfig::from_document_in(&registry, &json!({"mongo-uri": "mongodb://db"}))?;
/// assert_eq!(config.get::<MongoUri>().0, "mongodb://db");
/// # Ok::<(), secdist::SecdistError>(())
/// ```
pub struct SecdistConfig {
    sections: Vec<StoredSection>,
    slots: HashMap<TypeId, usize>,
}

impl SecdistConfig {
    /// Resolve the document described by `options` and build against the global registry.
    pub fn load(options: &SecdistOptions) -> Result<Self, SecdistError> {
        Self::load_in(Registry::global(), options)
    }

    /// Resolve the document described by `options` and build against `registry`.
    pub fn load_in(registry: &Registry, options: &SecdistOptions) -> Result<Self, SecdistError> {
        let doc = options.load_document()?;
        Self::from_document_in(registry, &doc)
    }

    /// Build against the global registry from an already resolved document.
    pub fn from_document(doc: &Value) -> Result<Self, SecdistError> {
        Self::from_document_in(Registry::global(), doc)
    }

    /// Build against `registry` from an already resolved document.
    ///
    /// Every section registered at call time gets a slot. Sections registered
    /// later are not part of this config.
    pub fn from_document_in(registry: &Registry, doc: &Value) -> Result<Self, SecdistError> {
        let (entries, slots) = registry.snapshot();

        let mut sections = Vec::with_capacity(entries.len());
        for (slot, entry) in entries.into_iter().enumerate() {
            let value = (entry.factory)(doc).map_err(|source| {
                tracing::debug!(section = entry.name, slot, error = %source, "Secdist section rejected document");
                SecdistError::MalformedSection {
                    section: entry.name,
                    slot,
                    source,
                }
            })?;
            sections.push(StoredSection {
                type_id: entry.type_id,
                name: entry.name,
                value,
            });
        }

        tracing::info!(sections = sections.len(), "Secdist config built");
        Ok(Self { sections, slots })
    }

    /// Build against the global registry from an empty document.
    ///
    /// Fails if any registered section requires a key.
    pub fn empty() -> Result<Self, SecdistError> {
        Self::empty_in(Registry::global())
    }

    /// Build against `registry` from an empty document.
    pub fn empty_in(registry: &Registry) -> Result<Self, SecdistError> {
        Self::from_document_in(registry, &Value::Object(Map::new()))
    }

    /// The section of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` was not registered when this config was built.
    pub fn get<T: Any>(&self) -> &T {
        match self.try_get::<T>() {
            Some(section) => section,
            None => panic!(
                "type {} is not registered as a secdist section",
                type_name::<T>()
            ),
        }
    }

    /// The section of type `T`, or `None` if `T` was not registered when this
    /// config was built.
    pub fn try_get<T: Any>(&self) -> Option<&T> {
        let index = *self.slots.get(&TypeId::of::<T>())?;
        Some(self.downcast::<T>(index))
    }

    /// The section stored in `slot`, without a type lookup.
    ///
    /// # Panics
    ///
    /// Panics if `slot` comes from a registration made after this config was
    /// built, or from a different registry holding another type at that index.
    pub fn get_slot<T: Any>(&self, slot: Slot<T>) -> &T {
        self.downcast::<T>(slot.index())
    }

    fn downcast<T: Any>(&self, index: usize) -> &T {
        let Some(stored) = self.sections.get(index) else {
            panic!(
                "secdist slot {index} for {} is out of range; config holds {} sections",
                type_name::<T>(),
                self.sections.len()
            );
        };
        match stored.value.downcast_ref::<T>() {
            Some(section) => section,
            None => panic!(
                "secdist slot {index} holds section '{}', not {}",
                stored.name,
                type_name::<T>()
            ),
        }
    }

    /// Whether this config holds a section of type `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Slot index and name of every section, in slot order.
    pub fn sections(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.sections
            .iter()
            .enumerate()
            .map(|(index, stored)| (index, stored.name))
    }

    /// Whether slot `index` holds a value of type `T`.
    pub fn slot_holds<T: Any>(&self, index: usize) -> bool {
        self.sections
            .get(index)
            .is_some_and(|stored| stored.type_id == TypeId::of::<T>())
    }
}

// Section values are credentials; only names are printed.
impl fmt::Debug for SecdistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecdistConfig")
            .field("sections", &self.sections().map(|(_, name)| name).collect::<Vec<_>>())
            .finish()
    }
}
