//! High-level SDK for dbus-client-gen.
//!
//! Generates, for each interface of an introspected object, both artifacts
//! at once: an [`AccessorType`] for reading properties out of
//! `GetManagedObjects()` entries and a [`QueryFactory`] for finding those
//! entries. This is the main entry point for applications embedding the
//! generators.

pub mod generator;
pub mod interfaces;

pub use generator::{ClientGenerator, GeneratedInterface};
pub use interfaces::InterfaceSet;

// Re-export key types
pub use dcg_accessor::{build_accessor, Accessor, AccessorType, PropertyReader};
pub use dcg_query::{build_query_factory, MatchConfig, MatchOutcome, Predicate, Query, QueryFactory, Search};
pub use dcg_types::{
    ClientError, GenerationError, GeneratorConfig, InterfaceDescription, InterfaceSpec,
    IntrospectedInterface, IntrospectedProperty, ManagedObjects, ObjectEntry, ObjectPath,
    PropertyTable, Result, RuntimeError, SearchConditionError, Value,
};
