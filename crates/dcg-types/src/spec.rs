//! Interface descriptions and the validated [`InterfaceSpec`].
//!
//! An [`InterfaceDescription`] is whatever an external parser produced from
//! an introspection document. It may be incomplete: names can be missing or
//! empty. [`InterfaceSpec`] is the validated form the generators consume;
//! once built it is immutable and every invariant below holds:
//!
//! - the interface name is non-empty
//! - every property name is non-empty
//! - property names are unique (set semantics)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::names::{validate_interface_name, validate_member_name};

/// An already-parsed interface declaration.
///
/// Implemented by whatever adapter sits between the introspection document
/// format and the generators. `None` stands for an absent `name` attribute.
pub trait InterfaceDescription {
    /// The declared interface name, if the document carries one.
    fn interface_name(&self) -> Option<&str>;

    /// The names of the declared properties, in document order.
    fn property_names(&self) -> Vec<Option<&str>>;
}

/// A plain-data interface declaration, e.g. deserialized from JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectedInterface {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Vec<IntrospectedProperty>,
}

/// One `<property>` element of an introspected interface.
///
/// Only `name` is used by the generators; `signature` and `access` are kept
/// so a description survives a round trip through this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectedProperty {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

impl IntrospectedInterface {
    /// A description with the given name and property names.
    pub fn new<I, S>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            properties: properties
                .into_iter()
                .map(|p| IntrospectedProperty {
                    name: Some(p.into()),
                    ..Default::default()
                })
                .collect(),
        }
    }
}

impl InterfaceDescription for IntrospectedInterface {
    fn interface_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn property_names(&self) -> Vec<Option<&str>> {
        self.properties.iter().map(|p| p.name.as_deref()).collect()
    }
}

/// A validated interface: its name and the set of property names it
/// declares.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InterfaceSpec {
    name: String,
    properties: BTreeSet<String>,
}

impl InterfaceSpec {
    /// Build a spec from a name and property names, validating both.
    pub fn new<I, S>(
        name: impl Into<String>,
        properties: I,
        config: &GeneratorConfig,
    ) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let properties: Vec<String> = properties.into_iter().map(Into::into).collect();
        Self::validated(
            Some(name.as_str()),
            properties.iter().map(|p| Some(p.as_str())),
            config,
        )
    }

    /// Build a spec from an external description.
    ///
    /// Fails with a [`GenerationError`] if the interface or any property
    /// lacks a usable name.
    pub fn from_description<D>(desc: &D, config: &GeneratorConfig) -> Result<Self, GenerationError>
    where
        D: InterfaceDescription + ?Sized,
    {
        Self::validated(desc.interface_name(), desc.property_names(), config)
    }

    fn validated<'a, I>(
        name: Option<&str>,
        properties: I,
        config: &GeneratorConfig,
    ) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let name = match name {
            None => return Err(GenerationError::MissingInterfaceName),
            Some("") => return Err(GenerationError::EmptyInterfaceName),
            Some(name) => name,
        };
        if config.strict_names {
            validate_interface_name(name)?;
        }

        let mut declared = BTreeSet::new();
        for (index, property) in properties.into_iter().enumerate() {
            let property = match property {
                None => {
                    return Err(GenerationError::MissingPropertyName {
                        interface_name: name.to_string(),
                        index,
                    })
                }
                Some("") => {
                    return Err(GenerationError::EmptyPropertyName {
                        interface_name: name.to_string(),
                        index,
                    })
                }
                Some(property) => property,
            };
            if config.strict_names {
                validate_member_name(property)?;
            }
            if !declared.insert(property.to_string()) {
                if config.reject_duplicate_properties {
                    return Err(GenerationError::DuplicateProperty {
                        interface_name: name.to_string(),
                        property: property.to_string(),
                    });
                }
                debug!(interface = name, property, "collapsing duplicate property declaration");
            }
        }

        Ok(Self {
            name: name.to_string(),
            properties: declared,
        })
    }

    /// The interface name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared property names, sorted.
    pub fn properties(&self) -> &BTreeSet<String> {
        &self.properties
    }

    /// Returns `true` if the interface declares `property`.
    pub fn declares(&self, property: &str) -> bool {
        self.properties.contains(property)
    }
}
