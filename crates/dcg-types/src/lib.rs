//! Foundation types for dbus-client-gen.
//!
//! This crate provides the data model shared by the accessor generator and
//! the query compiler. Every other `dcg` crate depends on `dcg-types`.
//!
//! # Key Types
//!
//! - [`Value`] — A property value as delivered by the bus
//! - [`ObjectPath`] — Opaque identifier of one managed object
//! - [`ManagedObjects`] — The nested result of a `GetManagedObjects()` call
//! - [`InterfaceDescription`] — Seam to an already-parsed interface document
//! - [`InterfaceSpec`] — A validated interface name plus its property set
//! - [`GeneratorConfig`] — Strictness knobs applied at generation time
//! - [`ClientError`] — Root of the error taxonomy

pub mod config;
pub mod error;
pub mod names;
pub mod object;
pub mod spec;
pub mod value;

pub use config::GeneratorConfig;
pub use error::{ClientError, GenerationError, Result, RuntimeError, SearchConditionError};
pub use names::{validate_interface_name, validate_member_name};
pub use object::{ManagedObjects, ObjectEntry, ObjectPath, PropertyTable};
pub use spec::{InterfaceDescription, InterfaceSpec, IntrospectedInterface, IntrospectedProperty};
pub use value::Value;
