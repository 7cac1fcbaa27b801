//! A set of generated interfaces, keyed by interface name.

use std::collections::btree_map::{self, BTreeMap};

use dcg_types::{GenerationError, ObjectEntry};

use crate::generator::GeneratedInterface;

/// Generated interfaces keyed by name, typically every interface of one
/// introspected object.
#[derive(Clone, Debug, Default)]
pub struct InterfaceSet {
    interfaces: BTreeMap<String, GeneratedInterface>,
}

impl InterfaceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a generated interface.
    ///
    /// Fails with [`GenerationError::DuplicateInterface`] if an interface
    /// with the same name is already present.
    pub fn insert(&mut self, generated: GeneratedInterface) -> Result<(), GenerationError> {
        match self.interfaces.entry(generated.name().to_string()) {
            btree_map::Entry::Occupied(existing) => Err(GenerationError::DuplicateInterface {
                interface_name: existing.key().clone(),
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(generated);
                Ok(())
            }
        }
    }

    /// Look up an interface by name.
    pub fn get(&self, name: &str) -> Option<&GeneratedInterface> {
        self.interfaces.get(name)
    }

    /// All interfaces, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedInterface> {
        self.interfaces.values()
    }

    /// Number of interfaces in the set.
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns `true` if the set holds no interfaces.
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// The interfaces of this set that `entry` implements.
    pub fn interfaces_of<'a>(
        &'a self,
        entry: &'a ObjectEntry,
    ) -> impl Iterator<Item = &'a GeneratedInterface> + 'a {
        self.interfaces
            .values()
            .filter(move |generated| generated.is_implemented_by(entry))
    }
}
