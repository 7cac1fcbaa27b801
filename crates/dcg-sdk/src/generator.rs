use std::sync::Arc;

use tracing::{debug, info};

use dcg_accessor::AccessorType;
use dcg_query::{Query, QueryFactory};
use dcg_types::{
    GenerationError, GeneratorConfig, InterfaceDescription, InterfaceSpec, ObjectEntry,
    RuntimeError, Value,
};

use crate::interfaces::InterfaceSet;

// ---------------------------------------------------------------------------
// GeneratedInterface
// ---------------------------------------------------------------------------

/// Both generated artifacts for one interface, sharing one spec.
#[derive(Clone, Debug)]
pub struct GeneratedInterface {
    spec: Arc<InterfaceSpec>,
    accessor: AccessorType,
    queries: QueryFactory,
}

impl GeneratedInterface {
    /// Generate both artifacts from an already validated spec.
    pub fn from_spec(spec: impl Into<Arc<InterfaceSpec>>) -> Self {
        let spec = spec.into();
        Self {
            accessor: AccessorType::build(Arc::clone(&spec)),
            queries: QueryFactory::build(Arc::clone(&spec)),
            spec,
        }
    }

    /// The interface name.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// The spec both artifacts were generated from.
    pub fn spec(&self) -> &Arc<InterfaceSpec> {
        &self.spec
    }

    /// The generated accessor type.
    pub fn accessor(&self) -> &AccessorType {
        &self.accessor
    }

    /// The generated query factory.
    pub fn queries(&self) -> &QueryFactory {
        &self.queries
    }

    /// Shorthand for `self.queries().query(props)`.
    pub fn query<I, K, V>(&self, props: I) -> Result<Query, RuntimeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.queries.query(props)
    }

    /// Returns `true` if `entry` carries a table for this interface.
    pub fn is_implemented_by(&self, entry: &ObjectEntry) -> bool {
        entry.contains_key(self.spec.name())
    }
}

// ---------------------------------------------------------------------------
// ClientGenerator
// ---------------------------------------------------------------------------

/// Turns interface descriptions into generated interfaces under one
/// [`GeneratorConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientGenerator {
    config: GeneratorConfig,
}

impl ClientGenerator {
    /// Create a generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the accessor type and query factory for one interface.
    pub fn generate<D>(&self, desc: &D) -> Result<GeneratedInterface, GenerationError>
    where
        D: InterfaceDescription + ?Sized,
    {
        let spec = InterfaceSpec::from_description(desc, &self.config)?;
        debug!(interface = spec.name(), "generating client artifacts");
        Ok(GeneratedInterface::from_spec(spec))
    }

    /// Generate every interface of an introspected object.
    ///
    /// Fails on the first malformed description, or if two descriptions
    /// name the same interface.
    pub fn generate_all<'d, D, I>(&self, descs: I) -> Result<InterfaceSet, GenerationError>
    where
        I: IntoIterator<Item = &'d D>,
        D: InterfaceDescription + 'd + ?Sized,
    {
        let mut set = InterfaceSet::new();
        for desc in descs {
            set.insert(self.generate(desc)?)?;
        }
        info!(interfaces = set.len(), "generated client artifacts");
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use dcg_types::{IntrospectedInterface, PropertyTable};

    use super::*;

    #[test]
    fn artifacts_share_spec() {
        let desc = IntrospectedInterface::new("com.example.Widget", ["size"]);
        let generated = ClientGenerator::default().generate(&desc).unwrap();
        assert!(Arc::ptr_eq(generated.accessor().spec(), generated.queries().spec()));
        assert_eq!(generated.name(), "com.example.Widget");
    }

    #[test]
    fn generate_reports_generation_errors() {
        let desc = IntrospectedInterface::default();
        assert_eq!(
            ClientGenerator::default().generate(&desc).unwrap_err(),
            GenerationError::MissingInterfaceName
        );
    }

    #[test]
    fn strict_generator_checks_names() {
        let desc = IntrospectedInterface::new("Widget", ["size"]);
        assert!(ClientGenerator::default().generate(&desc).is_ok());
        assert!(matches!(
            ClientGenerator::new(GeneratorConfig::strict()).generate(&desc),
            Err(GenerationError::InvalidName { .. })
        ));
    }

    #[test]
    fn generate_all_rejects_duplicate_interfaces() {
        let descs = vec![
            IntrospectedInterface::new("com.example.Widget", ["size"]),
            IntrospectedInterface::new("com.example.Widget", ["color"]),
        ];
        let err = ClientGenerator::default().generate_all(&descs).unwrap_err();
        assert_eq!(
            err,
            GenerationError::DuplicateInterface {
                interface_name: "com.example.Widget".into()
            }
        );
    }

    #[test]
    fn implemented_by_checks_interface_key() {
        let desc = IntrospectedInterface::new("com.example.Widget", ["size"]);
        let generated = ClientGenerator::default().generate(&desc).unwrap();
        let mut entry = ObjectEntry::new();
        assert!(!generated.is_implemented_by(&entry));
        entry.insert("com.example.Widget".into(), PropertyTable::new());
        assert!(generated.is_implemented_by(&entry));
    }
}
