//! Query compilation for dbus-client-gen.
//!
//! A [`QueryFactory`] is compiled once per interface. Each call to
//! [`QueryFactory::query`] checks the requested properties against the
//! interface's declared set and returns a [`Query`]: an immutable predicate
//! over single entries of a `GetManagedObjects()` result plus a
//! [`Query::search`] over a whole result.
//!
//! # Matching
//!
//! An entry that does not implement the interface is simply not a match.
//! An entry that implements it matches if every requested property is
//! present and equal. A requested property missing from an implementing
//! entry is an error ([`RuntimeError::MissingSearchProperties`]), because it
//! means the data disagrees with the schema.
//!
//! # Quick Start
//!
//! ```rust
//! use dcg_query::build_query_factory;
//! use dcg_types::{GeneratorConfig, IntrospectedInterface, ManagedObjects, Value};
//!
//! let desc = IntrospectedInterface::new("com.example.Widget", ["size", "color"]);
//! let widgets = build_query_factory(&desc, &GeneratorConfig::default()).unwrap();
//!
//! let objects: ManagedObjects = serde_json::from_str(r#"{
//!     "/w/0": {"com.example.Widget": {"size": 3, "color": "red"}},
//!     "/w/1": {"com.example.Widget": {"size": 4, "color": "blue"}}
//! }"#).unwrap();
//!
//! let query = widgets.query([("size", Value::from(3))]).unwrap();
//! let paths = query.search_paths(&objects).unwrap();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].as_str(), "/w/0");
//! ```
//!
//! [`RuntimeError::MissingSearchProperties`]: dcg_types::RuntimeError::MissingSearchProperties

pub mod factory;
pub mod predicate;
pub mod query;

pub use factory::{build_query_factory, QueryFactory};
pub use predicate::{MatchConfig, MatchOutcome, Predicate};
pub use query::{Query, Search};
