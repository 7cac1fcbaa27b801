use dcg_types::{ObjectEntry, ObjectPath, RuntimeError, Value};

// ---------------------------------------------------------------------------
// MatchOutcome
// ---------------------------------------------------------------------------

/// The outcome of matching one entry against a [`MatchConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The entry implements the interface and every property matches.
    Matched,
    /// The entry implements the interface but some property differs.
    Mismatched,
    /// The entry does not implement the interface.
    NotImplemented,
}

impl MatchOutcome {
    /// Returns `true` if the outcome is `Matched`.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched)
    }
}

// ---------------------------------------------------------------------------
// MatchConfig
// ---------------------------------------------------------------------------

/// The bound configuration of a single-interface match: which interface to
/// look at and which property values to require.
///
/// `props` keeps the order the properties were requested in. A property
/// requested twice keeps its first position and its last value.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    pub interface_name: String,
    pub props: Vec<(String, Value)>,
}

impl MatchConfig {
    pub fn new<I>(interface_name: impl Into<String>, props: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut ordered: Vec<(String, Value)> = Vec::new();
        for (key, value) in props {
            match ordered.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => ordered.push((key, value)),
            }
        }
        Self {
            interface_name: interface_name.into(),
            props: ordered,
        }
    }

    /// The requested property names, in request order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|(k, _)| k.as_str())
    }

    /// Match one entry.
    ///
    /// Every requested property must be present in the entry's table for
    /// the interface before any value is compared, so the result does not
    /// depend on the order properties are checked in.
    pub fn evaluate(
        &self,
        object_path: &ObjectPath,
        entry: &ObjectEntry,
    ) -> Result<MatchOutcome, RuntimeError> {
        let Some(table) = entry.get(&self.interface_name) else {
            return Ok(MatchOutcome::NotImplemented);
        };

        if self.keys().any(|key| !table.contains_key(key)) {
            return Err(RuntimeError::MissingSearchProperties {
                interface_name: self.interface_name.clone(),
                object_path: object_path.clone(),
                query_keys: self.keys().map(str::to_string).collect(),
                data_keys: table.keys().cloned().collect(),
            });
        }

        let all_equal = self
            .props
            .iter()
            .all(|(key, value)| table.get(key.as_str()) == Some(value));

        Ok(if all_equal {
            MatchOutcome::Matched
        } else {
            MatchOutcome::Mismatched
        })
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// A boolean combination of single-interface matches.
///
/// Evaluation is short-circuit, left to right. Errors from either operand
/// propagate unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Match(MatchConfig),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluate the predicate against one entry.
    pub fn evaluate(&self, object_path: &ObjectPath, entry: &ObjectEntry) -> Result<bool, RuntimeError> {
        match self {
            Self::Match(config) => Ok(config.evaluate(object_path, entry)?.is_match()),
            Self::And(left, right) => {
                Ok(left.evaluate(object_path, entry)? && right.evaluate(object_path, entry)?)
            }
            Self::Or(left, right) => {
                Ok(left.evaluate(object_path, entry)? || right.evaluate(object_path, entry)?)
            }
            Self::Not(inner) => Ok(!inner.evaluate(object_path, entry)?),
        }
    }

    /// The leftmost single-interface match in the tree. Diagnostics for a
    /// composed query are reported against it.
    pub fn primary(&self) -> &MatchConfig {
        match self {
            Self::Match(config) => config,
            Self::And(left, _) | Self::Or(left, _) => left.primary(),
            Self::Not(inner) => inner.primary(),
        }
    }

    /// Every single-interface match in the tree, left to right.
    pub fn leaves(&self) -> Vec<&MatchConfig> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a MatchConfig>) {
        match self {
            Self::Match(config) => out.push(config),
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
            Self::Not(inner) => inner.collect_leaves(out),
        }
    }
}
