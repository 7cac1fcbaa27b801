use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use dcg_types::{
    GenerationError, GeneratorConfig, InterfaceDescription, InterfaceSpec, PropertyTable,
    RuntimeError, Value,
};

use crate::predicate::MatchConfig;
use crate::query::Query;

/// Compiles property/value requests into [`Query`] objects for one
/// interface.
#[derive(Clone, Debug)]
pub struct QueryFactory {
    spec: Arc<InterfaceSpec>,
}

impl QueryFactory {
    /// Build the factory for `spec`.
    pub fn build(spec: impl Into<Arc<InterfaceSpec>>) -> Self {
        let spec = spec.into();
        debug!(
            interface = spec.name(),
            properties = spec.properties().len(),
            "built query factory"
        );
        Self { spec }
    }

    /// The interface queries from this factory search for.
    pub fn interface_name(&self) -> &str {
        self.spec.name()
    }

    /// The spec this factory was compiled from.
    pub fn spec(&self) -> &Arc<InterfaceSpec> {
        &self.spec
    }

    /// Build a query requiring each property in `props` to have the given
    /// value.
    ///
    /// The properties are checked against the interface once, here; a
    /// search never re-checks them. Fails with
    /// [`RuntimeError::UnknownSearchProperties`] naming exactly the
    /// properties the interface does not declare. `specified` lists the
    /// requested properties in request order; `allowed` and `unknown` are
    /// sorted.
    pub fn query<I, K, V>(&self, props: I) -> Result<Query, RuntimeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let config = MatchConfig::new(
            self.spec.name(),
            props.into_iter().map(|(k, v)| (k.into(), v.into())),
        );

        let unknown: BTreeSet<String> = config
            .keys()
            .filter(|k| !self.spec.declares(k))
            .map(str::to_string)
            .collect();
        if !unknown.is_empty() {
            return Err(RuntimeError::UnknownSearchProperties {
                interface_name: self.spec.name().to_string(),
                specified: config.keys().map(str::to_string).collect(),
                allowed: self.spec.properties().iter().cloned().collect(),
                unknown: unknown.into_iter().collect(),
            });
        }

        Ok(Query::from_config(config))
    }

    /// A query matching every object that implements the interface.
    pub fn all(&self) -> Query {
        Query::from_config(MatchConfig::new(self.spec.name(), PropertyTable::new()))
    }
}

/// Build a [`QueryFactory`] straight from an interface description.
///
/// Fails with a [`GenerationError`] if the description lacks an interface
/// name or any property lacks a name.
pub fn build_query_factory<D>(desc: &D, config: &GeneratorConfig) -> Result<QueryFactory, GenerationError>
where
    D: InterfaceDescription + ?Sized,
{
    let spec = InterfaceSpec::from_description(desc, config)?;
    Ok(QueryFactory::build(spec))
}
