//! The client error taxonomy.
//!
//! Failures split into two families:
//!
//! - [`GenerationError`]: the interface description is malformed or
//!   incomplete. Raised only while building accessors or query factories,
//!   never while using them.
//! - [`RuntimeError`]: the data handed to a generated artifact is missing
//!   something or does not fit the schema. Every variant carries the name of
//!   the interface the artifact is bound to.
//!
//! [`ClientError`] is the root that either family converts into.

use thiserror::Error;

use crate::object::{ObjectEntry, ObjectPath, PropertyTable};

/// Root of the error taxonomy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl From<SearchConditionError> for ClientError {
    fn from(err: SearchConditionError) -> Self {
        Self::Runtime(RuntimeError::SearchCondition(err))
    }
}

/// Convenience alias for operations that may fail at either stage.
pub type Result<T> = std::result::Result<T, ClientError>;

/// A malformed or incomplete interface description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The description does not name its interface.
    #[error("no name attribute found for interface")]
    MissingInterfaceName,

    /// The interface name is the empty string.
    #[error("interface name must not be empty")]
    EmptyInterfaceName,

    /// A declared property has no name.
    #[error("property #{index} of interface \"{interface_name}\" has no name attribute")]
    MissingPropertyName { interface_name: String, index: usize },

    /// A declared property name is the empty string.
    #[error("property #{index} of interface \"{interface_name}\" has an empty name")]
    EmptyPropertyName { interface_name: String, index: usize },

    /// The same property is declared twice.
    #[error("property \"{property}\" is declared more than once on interface \"{interface_name}\"")]
    DuplicateProperty {
        interface_name: String,
        property: String,
    },

    /// The same interface appears twice in one generation batch.
    #[error("interface \"{interface_name}\" is described more than once")]
    DuplicateInterface { interface_name: String },

    /// A name violates the D-Bus naming rules.
    #[error("invalid name \"{name}\": {reason}")]
    InvalidName { name: String, reason: String },
}

/// A failure while using a generated accessor or query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// The entry has no table for the bound interface.
    #[error("object data does not contain interface \"{interface_name}\"")]
    MissingInterface { interface_name: String },

    /// The interface table lacks a declared property being read.
    #[error("no value for property \"{property}\" of interface \"{interface_name}\"")]
    MissingProperty {
        interface_name: String,
        property: String,
    },

    /// A read was attempted for a property the interface does not declare.
    #[error("interface \"{interface_name}\" declares no property \"{property}\"")]
    UndeclaredProperty {
        interface_name: String,
        property: String,
    },

    /// An entry implementing the interface lacks a property the query
    /// refers to.
    #[error(
        "missing properties in data for object \"{object_path}\" for interface \"{interface_name}\": {}",
        missing_keys(.query_keys, .data_keys).join(", ")
    )]
    MissingSearchProperties {
        interface_name: String,
        object_path: ObjectPath,
        query_keys: Vec<String>,
        data_keys: Vec<String>,
    },

    /// The query names properties the interface does not declare.
    #[error(
        "unknown search properties for interface \"{interface_name}\": {}; allowed: {}",
        .unknown.join(", "),
        .allowed.join(", ")
    )]
    UnknownSearchProperties {
        interface_name: String,
        specified: Vec<String>,
        allowed: Vec<String>,
        unknown: Vec<String>,
    },

    /// The search result violates a shape condition.
    #[error(transparent)]
    SearchCondition(#[from] SearchConditionError),
}

impl RuntimeError {
    /// The interface the failing artifact is bound to.
    pub fn interface_name(&self) -> &str {
        match self {
            Self::MissingInterface { interface_name }
            | Self::MissingProperty { interface_name, .. }
            | Self::UndeclaredProperty { interface_name, .. }
            | Self::MissingSearchProperties { interface_name, .. }
            | Self::UnknownSearchProperties { interface_name, .. } => interface_name,
            Self::SearchCondition(err) => err.interface_name(),
        }
    }

    /// Query keys absent from the data, for a
    /// [`RuntimeError::MissingSearchProperties`]. Empty for other variants.
    pub fn missing_keys(&self) -> Vec<String> {
        match self {
            Self::MissingSearchProperties {
                query_keys,
                data_keys,
                ..
            } => missing_keys(query_keys, data_keys),
            _ => Vec::new(),
        }
    }
}

/// A search result that has the wrong shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchConditionError {
    /// A query required exactly one match and found some other number.
    #[error(
        "expected exactly one object implementing \"{interface_name}\" to match, found {}",
        .result.len()
    )]
    UniqueResult {
        interface_name: String,
        props: PropertyTable,
        result: Vec<(ObjectPath, ObjectEntry)>,
    },
}

impl SearchConditionError {
    /// The interface of the query whose result was rejected.
    pub fn interface_name(&self) -> &str {
        match self {
            Self::UniqueResult { interface_name, .. } => interface_name,
        }
    }
}

fn missing_keys(query_keys: &[String], data_keys: &[String]) -> Vec<String> {
    query_keys
        .iter()
        .filter(|k| !data_keys.contains(k))
        .cloned()
        .collect()
}
