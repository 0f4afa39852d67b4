//! Process-wide table of section factories.
//!
//! Responsibilities:
//! - Assign each distinct section type a stable slot index on first registration.
//! - Remember the factory that builds that type from the secdist document.
//! - Replay link-time `register_section!` submissions into the global registry.
//!
//! Does NOT handle:
//! - Running factories or storing section values (see `config.rs`).
//! - Loading the document (see `loader`).
//!
//! Invariants:
//! - Slots start at 0, grow by one per distinct type, and are never reused or removed.
//! - Registering a type twice returns its original slot; the first factory wins.
//! - A single mutex guards the table; it is only ever appended to, so a poisoned
//!   lock still holds a consistent table and is recovered.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::section::{Section, SectionError};

/// Type-erased section value as stored in a [`SecdistConfig`](crate::SecdistConfig).
pub type ErasedSection = Box<dyn Any + Send + Sync>;

/// Type-erased factory: builds one section from the whole document.
pub type Factory = Arc<dyn Fn(&Value) -> Result<ErasedSection, SectionError> + Send + Sync>;

/// Typed handle to the slot assigned to `T`.
///
/// Returned by registration; lets [`SecdistConfig::get_slot`](crate::SecdistConfig::get_slot)
/// index straight into the section sequence.
pub struct Slot<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Position of the section in every config built from the owning registry.
    pub fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("type", &type_name::<T>())
            .field("index", &self.index)
            .finish()
    }
}

/// One registered section type.
#[derive(Clone)]
pub(crate) struct Entry {
    pub(crate) type_id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) factory: Factory,
}

/// Name and slot of a registered section, for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSection {
    pub index: usize,
    pub name: &'static str,
}

#[derive(Default)]
struct Table {
    entries: Vec<Entry>,
    slots: HashMap<TypeId, usize>,
}

/// Append-only table mapping section types to slots and factories.
///
/// Most programs use [`Registry::global`]. Tests build an isolated registry
/// with [`Registry::new`] so registrations do not leak between them.
#[derive(Default)]
pub struct Registry {
    table: Mutex<Table>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    let registry = Registry::new();
    for submission in inventory::iter::<SectionRegistration> {
        tracing::trace!(section = submission.name(), "Replaying secdist section submission");
        submission.apply(&registry);
    }
    tracing::debug!(
        sections = registry.len(),
        "Global secdist registry initialized"
    );
    registry
});

impl Registry {
    /// Create an empty, isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    ///
    /// On first access every section submitted with
    /// [`register_section!`](crate::register_section) is registered, in link order.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `T` with [`Section::from_document`] as its factory.
    pub fn register<T: Section>(&self) -> Slot<T> {
        self.register_with(T::NAME, T::from_document)
    }

    /// Register `T` with a custom factory.
    ///
    /// If `T` is already registered the existing slot is returned and
    /// `factory` is dropped.
    pub fn register_with<T, F>(&self, name: &'static str, factory: F) -> Slot<T>
    where
        T: Any + Send + Sync,
        F: Fn(&Value) -> Result<T, SectionError> + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        let mut table = self.lock();
        if let Some(&index) = table.slots.get(&type_id) {
            return Slot::new(index);
        }

        let index = table.entries.len();
        let factory: Factory =
            Arc::new(move |doc: &Value| factory(doc).map(|section| Box::new(section) as ErasedSection));
        table.entries.push(Entry {
            type_id,
            name,
            factory,
        });
        table.slots.insert(type_id, index);
        drop(table);

        tracing::debug!(section = name, slot = index, "Registered secdist section");
        Slot::new(index)
    }

    /// Factory registered at `index`.
    ///
    /// # Panics
    ///
    /// Panics if nothing is registered at `index`.
    pub fn factory_at(&self, index: usize) -> Factory {
        let table = self.lock();
        match table.entries.get(index) {
            Some(entry) => Arc::clone(&entry.factory),
            None => panic!(
                "no secdist section registered at slot {index} (registry holds {})",
                table.entries.len()
            ),
        }
    }

    /// Slot of `T`, if it has been registered.
    pub fn slot_of<T: Any>(&self) -> Option<Slot<T>> {
        self.lock()
            .slots
            .get(&TypeId::of::<T>())
            .map(|&index| Slot::new(index))
    }

    /// Number of registered section types.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered sections in slot order.
    pub fn entries(&self) -> Vec<RegisteredSection> {
        self.lock()
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| RegisteredSection {
                index,
                name: entry.name,
            })
            .collect()
    }

    /// Copy of the table, so factories can run without holding the lock.
    pub(crate) fn snapshot(&self) -> (Vec<Entry>, HashMap<TypeId, usize>) {
        let table = self.lock();
        (table.entries.clone(), table.slots.clone())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("sections", &self.entries())
            .finish()
    }
}

/// Register `T` in the global registry.
///
/// Call once per section type during process setup, in any order. Calling it
/// again for the same type is harmless and returns the same slot.
pub fn register<T: Section>() -> Slot<T> {
    Registry::global().register::<T>()
}

/// Link-time registration record collected by `inventory`.
///
/// Created by [`register_section!`](crate::register_section); not meant to be
/// built by hand.
pub struct SectionRegistration {
    name: &'static str,
    register: fn(&Registry),
}

impl SectionRegistration {
    #[doc(hidden)]
    pub const fn new<T: Section>() -> Self {
        Self {
            name: T::NAME,
            register: register_submitted::<T>,
        }
    }

    /// Name of the submitted section.
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, registry: &Registry) {
        (self.register)(registry);
    }
}

fn register_submitted<T: Section>(registry: &Registry) {
    registry.register::<T>();
}

inventory::collect!(SectionRegistration);

/// Submit a [`Section`] type for registration in [`Registry::global`].
///
/// ```rust,ignore
/// secdist::register_section!(UserPasswords);
/// ```
#[macro_export]
macro_rules! register_section {
    ($section:ty) => {
        $crate::inventory::submit! {
            $crate::SectionRegistration::new::<$section>()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Alpha;
    struct Beta(u32);

    impl Section for Alpha {
        const NAME: &'static str = "alpha";

        fn from_document(_doc: &Value) -> Result<Self, SectionError> {
            Ok(Self)
        }
    }

    impl Section for Beta {
        const NAME: &'static str = "beta";

        fn from_document(doc: &Value) -> Result<Self, SectionError> {
            Ok(Self(
                crate::section::optional_key(doc, "beta")?.unwrap_or_default(),
            ))
        }
    }

    #[test]
    fn test_slots_start_at_zero_and_increase() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.register::<Alpha>().index(), 0);
        assert_eq!(registry.register::<Beta>().index(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registration_is_idempotent() {
        let registry = Registry::new();
        let first = registry.register::<Alpha>();
        let second = registry.register::<Alpha>();

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_first_factory_wins() {
        let registry = Registry::new();
        registry.register_with("beta", |_| Ok(Beta(1)));
        registry.register_with("beta-again", |_| Ok(Beta(2)));

        let value = (registry.factory_at(0))(&json!({})).unwrap();
        assert_eq!(value.downcast_ref::<Beta>().map(|b| b.0), Some(1));
        assert_eq!(registry.entries()[0].name, "beta");
    }

    #[test]
    fn test_factory_at_builds_erased_value() {
        let registry = Registry::new();
        let slot = registry.register::<Beta>();

        let value = (registry.factory_at(slot.index()))(&json!({"beta": 7})).unwrap();
        assert_eq!(value.downcast_ref::<Beta>().map(|b| b.0), Some(7));
    }

    #[test]
    #[should_panic(expected = "no secdist section registered at slot 3")]
    fn test_factory_at_out_of_range_panics() {
        let registry = Registry::new();
        registry.register::<Alpha>();
        let _ = registry.factory_at(3);
    }

    #[test]
    fn test_slot_of_unregistered_is_none() {
        let registry = Registry::new();
        registry.register::<Alpha>();

        assert!(registry.slot_of::<Beta>().is_none());
        assert_eq!(registry.slot_of::<Alpha>().map(Slot::index), Some(0));
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = Registry::new();
        let second = Registry::new();
        first.register::<Alpha>();
        second.register::<Beta>();
        second.register::<Alpha>();

        assert_eq!(first.slot_of::<Alpha>().map(Slot::index), Some(0));
        assert_eq!(second.slot_of::<Alpha>().map(Slot::index), Some(1));
    }

    #[test]
    fn test_submission_registers_into_given_registry() {
        let registry = Registry::new();
        let submission = SectionRegistration::new::<Beta>();

        assert_eq!(submission.name(), "beta");
        submission.apply(&registry);
        submission.apply(&registry);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.slot_of::<Beta>().map(Slot::index), Some(0));
    }

    macro_rules! marker_sections {
        ($($name:ident),* $(,)?) => {
            $(
                struct $name;

                impl Section for $name {
                    const NAME: &'static str = stringify!($name);

                    fn from_document(_doc: &Value) -> Result<Self, SectionError> {
                        Ok(Self)
                    }
                }
            )*
        };
    }

    marker_sections!(S0, S1, S2, S3, S4, S5, S6, S7);

    #[test]
    fn test_concurrent_registration_assigns_unique_slots() {
        let registry = Registry::new();
        let registrars: [fn(&Registry) -> usize; 8] = [
            |r| r.register::<S0>().index(),
            |r| r.register::<S1>().index(),
            |r| r.register::<S2>().index(),
            |r| r.register::<S3>().index(),
            |r| r.register::<S4>().index(),
            |r| r.register::<S5>().index(),
            |r| r.register::<S6>().index(),
            |r| r.register::<S7>().index(),
        ];

        let mut indices: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = registrars
                .iter()
                .flat_map(|register| {
                    let registry = &registry;
                    // Two racing registrations per type.
                    [
                        scope.spawn(move || register(registry)),
                        scope.spawn(move || register(registry)),
                    ]
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(registry.len(), 8);
        for pair in indices.chunks(2) {
            assert_eq!(pair[0], pair[1], "same type must land on one slot");
        }
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
    }
}
