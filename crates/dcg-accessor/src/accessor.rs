use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use dcg_types::{InterfaceSpec, ObjectEntry, PropertyTable, RuntimeError, Value};

use crate::reader::PropertyReader;

// ---------------------------------------------------------------------------
// AccessorType
// ---------------------------------------------------------------------------

/// A generated accessor type, bound to one interface.
///
/// Built once per interface and reused for any number of entries. The
/// property table is fixed at build time; it is the only place the set of
/// readable properties is recorded.
#[derive(Clone, Debug)]
pub struct AccessorType {
    spec: Arc<InterfaceSpec>,
    type_name: String,
    readers: BTreeMap<String, PropertyReader>,
}

impl AccessorType {
    /// Build the accessor type for `spec`, with one reader per declared
    /// property.
    pub fn build(spec: impl Into<Arc<InterfaceSpec>>) -> Self {
        let spec = spec.into();
        let readers = spec
            .properties()
            .iter()
            .map(|p| (p.clone(), PropertyReader::new(spec.name(), p)))
            .collect::<BTreeMap<_, _>>();

        debug!(
            interface = spec.name(),
            properties = readers.len(),
            "built accessor type"
        );

        Self {
            type_name: spec.name().to_string(),
            spec,
            readers,
        }
    }

    /// Give the generated type a display name other than the interface
    /// name.
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Display name of the generated type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The interface this type is bound to.
    pub fn interface_name(&self) -> &str {
        self.spec.name()
    }

    /// The spec this type was generated from.
    pub fn spec(&self) -> &Arc<InterfaceSpec> {
        &self.spec
    }

    /// The declared property names, sorted.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.readers.keys().map(String::as_str)
    }

    /// The reader table, keyed by property name.
    pub fn readers(&self) -> &BTreeMap<String, PropertyReader> {
        &self.readers
    }

    /// The reader for `property`, if the interface declares it.
    pub fn reader(&self, property: &str) -> Option<&PropertyReader> {
        self.readers.get(property)
    }

    /// Wrap one entry of a `GetManagedObjects()` result.
    ///
    /// Fails with [`RuntimeError::MissingInterface`] if the entry has no
    /// table for the bound interface. Property presence is not checked
    /// here.
    pub fn wrap<'a>(&'a self, entry: &'a ObjectEntry) -> Result<Accessor<'a>, RuntimeError> {
        let table = entry
            .get(self.spec.name())
            .ok_or_else(|| RuntimeError::MissingInterface {
                interface_name: self.spec.name().to_string(),
            })?;
        Ok(Accessor {
            ty: self,
            entry,
            table,
        })
    }
}

// ---------------------------------------------------------------------------
// Accessor
// ---------------------------------------------------------------------------

/// A read-only view of one entry through a generated [`AccessorType`].
#[derive(Clone, Copy, Debug)]
pub struct Accessor<'a> {
    ty: &'a AccessorType,
    entry: &'a ObjectEntry,
    table: &'a PropertyTable,
}

impl<'a> Accessor<'a> {
    /// The type this accessor was produced by.
    pub fn accessor_type(&self) -> &'a AccessorType {
        self.ty
    }

    /// The wrapped entry, all interfaces included.
    pub fn entry(&self) -> &'a ObjectEntry {
        self.entry
    }

    /// The property table of the bound interface.
    pub fn table(&self) -> &'a PropertyTable {
        self.table
    }

    /// The reader for `property`, if the interface declares it.
    pub fn reader(&self, property: &str) -> Option<&'a PropertyReader> {
        self.ty.reader(property)
    }

    /// Read a declared property.
    ///
    /// Fails with [`RuntimeError::UndeclaredProperty`] if the interface does
    /// not declare `property`, and with [`RuntimeError::MissingProperty`] if
    /// the entry has no value for it.
    pub fn read(&self, property: &str) -> Result<&'a Value, RuntimeError> {
        let reader = self
            .ty
            .reader(property)
            .ok_or_else(|| RuntimeError::UndeclaredProperty {
                interface_name: self.ty.interface_name().to_string(),
                property: property.to_string(),
            })?;
        trace!(interface = self.ty.interface_name(), property, "reading property");
        reader.read(self.table)
    }

    /// Read every declared property, in name order. Each read succeeds or
    /// fails on its own.
    pub fn read_all(&self) -> Vec<(&'a str, Result<&'a Value, RuntimeError>)> {
        self.ty
            .readers
            .iter()
            .map(|(name, reader)| (name.as_str(), reader.read(self.table)))
            .collect()
    }
}
