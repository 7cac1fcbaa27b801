//! Accessor generation for dbus-client-gen.
//!
//! Given an interface spec, this crate builds an [`AccessorType`]: a table of
//! [`PropertyReader`]s, one per declared property. Wrapping an entry of a
//! `GetManagedObjects()` result yields an [`Accessor`], a read-only view that
//! reads those properties out of the entry's table for the interface.
//!
//! # Quick Start
//!
//! ```rust
//! use dcg_accessor::build_accessor;
//! use dcg_types::{GeneratorConfig, IntrospectedInterface, ObjectEntry, PropertyTable, Value};
//!
//! let desc = IntrospectedInterface::new("com.example.Widget", ["size", "color"]);
//! let widget = build_accessor(&desc, &GeneratorConfig::default()).unwrap();
//!
//! let mut table = PropertyTable::new();
//! table.insert("size".into(), Value::from(3));
//! let mut entry = ObjectEntry::new();
//! entry.insert("com.example.Widget".into(), table);
//!
//! let accessor = widget.wrap(&entry).unwrap();
//! assert_eq!(accessor.read("size").unwrap(), &Value::from(3));
//! assert!(accessor.read("color").is_err());
//! ```
//!
//! Interface absence is detected when wrapping, property absence only when
//! the property is read: entries delivered by incremental updates routinely
//! carry a partial property set.

pub mod accessor;
pub mod reader;

use dcg_types::{GenerationError, GeneratorConfig, InterfaceDescription, InterfaceSpec};

pub use accessor::{Accessor, AccessorType};
pub use reader::PropertyReader;

/// Build an [`AccessorType`] straight from an interface description.
///
/// Fails with a [`GenerationError`] if the description lacks an interface
/// name or any property lacks a name.
pub fn build_accessor<D>(desc: &D, config: &GeneratorConfig) -> Result<AccessorType, GenerationError>
where
    D: InterfaceDescription + ?Sized,
{
    let spec = InterfaceSpec::from_description(desc, config)?;
    Ok(AccessorType::build(spec))
}
