use serde::{Deserialize, Serialize};

/// Configuration applied while turning interface descriptions into
/// accessors and query factories.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Validate interface and property names against the D-Bus naming
    /// rules. Descriptions from arbitrary sources may carry non-conforming
    /// names, so this is off by default.
    pub strict_names: bool,
    /// Treat a property declared twice as a generation error instead of
    /// collapsing the duplicates.
    pub reject_duplicate_properties: bool,
}

impl GeneratorConfig {
    /// The strictest configuration: every check enabled.
    pub fn strict() -> Self {
        Self {
            strict_names: true,
            reject_duplicate_properties: true,
        }
    }
}
