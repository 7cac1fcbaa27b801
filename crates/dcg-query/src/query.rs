use std::collections::btree_map;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use dcg_types::{
    ManagedObjects, ObjectEntry, ObjectPath, RuntimeError, SearchConditionError, Value,
};

use crate::predicate::{MatchConfig, Predicate};

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A predicate over `GetManagedObjects()` entries, plus an optional
/// requirement that a search find exactly one match.
///
/// Queries are immutable values. Composition and
/// [`Self::require_unique_match`] return new queries.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    predicate: Predicate,
    unique: bool,
}

impl Query {
    pub(crate) fn from_config(config: MatchConfig) -> Self {
        Self {
            predicate: Predicate::Match(config),
            unique: false,
        }
    }

    /// Build a query without checking `props` against any schema.
    ///
    /// Prefer [`QueryFactory::query`](crate::QueryFactory::query), which
    /// rejects properties the interface does not declare.
    pub fn unchecked<I, K, V>(interface_name: impl Into<String>, props: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::from_config(MatchConfig::new(
            interface_name,
            props.into_iter().map(|(k, v)| (k.into(), v.into())),
        ))
    }

    /// The underlying predicate tree.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns `true` if searches must find exactly one match.
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// This query, with searches required to find exactly one match.
    pub fn require_unique_match(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    // BOOLEAN OPERATORS
    //
    // {AND, NOT} is functionally complete; OR is here for convenience.
    // Composed queries never inherit the uniqueness requirement.

    /// A query matching entries both `self` and `other` match.
    pub fn conjunction(&self, other: &Query) -> Query {
        Self {
            predicate: Predicate::And(
                Box::new(self.predicate.clone()),
                Box::new(other.predicate.clone()),
            ),
            unique: false,
        }
    }

    /// A query matching entries either `self` or `other` matches.
    pub fn disjunction(&self, other: &Query) -> Query {
        Self {
            predicate: Predicate::Or(
                Box::new(self.predicate.clone()),
                Box::new(other.predicate.clone()),
            ),
            unique: false,
        }
    }

    /// A query matching exactly the entries `self` does not.
    pub fn negation(&self) -> Query {
        Self {
            predicate: Predicate::Not(Box::new(self.predicate.clone())),
            unique: false,
        }
    }

    /// Evaluate the predicate against a single entry.
    pub fn matches(&self, object_path: &ObjectPath, entry: &ObjectEntry) -> Result<bool, RuntimeError> {
        self.predicate.evaluate(object_path, entry)
    }

    /// Search a `GetManagedObjects()` result.
    ///
    /// Without the uniqueness requirement the search is lazy: entries are
    /// matched as the iterator is consumed, and the iterator ends after
    /// yielding the first error.
    ///
    /// With the uniqueness requirement the whole result is matched here.
    /// Any matching error is returned directly, and a match count other
    /// than one is a [`SearchConditionError::UniqueResult`] carrying every
    /// match found.
    pub fn search<'a>(&'a self, objects: &'a ManagedObjects) -> Result<Search<'a>, RuntimeError> {
        if !self.unique {
            return Ok(self.lazy(objects));
        }

        let found = self.lazy(objects).collect::<Result<Vec<_>, _>>()?;
        debug!(
            interface = %self.predicate.primary().interface_name,
            matches = found.len(),
            "unique search evaluated"
        );

        if found.len() != 1 {
            let primary = self.predicate.primary();
            return Err(SearchConditionError::UniqueResult {
                interface_name: primary.interface_name.clone(),
                props: primary.props.iter().cloned().collect(),
                result: found
                    .into_iter()
                    .map(|(path, entry)| (path.clone(), entry.clone()))
                    .collect(),
            }
            .into());
        }

        Ok(Search {
            inner: SearchInner::Unique(found.into_iter().next()),
        })
    }

    /// Search, collecting just the paths of the matching objects.
    pub fn search_paths(&self, objects: &ManagedObjects) -> Result<Vec<ObjectPath>, RuntimeError> {
        self.search(objects)?
            .map(|item| item.map(|(path, _)| path.clone()))
            .collect()
    }

    fn lazy<'a>(&'a self, objects: &'a ManagedObjects) -> Search<'a> {
        Search {
            inner: SearchInner::Lazy {
                predicate: &self.predicate,
                entries: objects.iter(),
                done: false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Iterator over the matches of one [`Query::search`] call.
///
/// Each call to `search` returns a fresh iterator, so searching the same
/// result twice yields the same sequence.
#[derive(Debug)]
pub struct Search<'a> {
    inner: SearchInner<'a>,
}

#[derive(Debug)]
enum SearchInner<'a> {
    Lazy {
        predicate: &'a Predicate,
        entries: btree_map::Iter<'a, ObjectPath, ObjectEntry>,
        done: bool,
    },
    Unique(Option<(&'a ObjectPath, &'a ObjectEntry)>),
}

impl<'a> Iterator for Search<'a> {
    type Item = Result<(&'a ObjectPath, &'a ObjectEntry), RuntimeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            SearchInner::Unique(only) => only.take().map(Ok),
            SearchInner::Lazy {
                predicate,
                entries,
                done,
            } => {
                if *done {
                    return None;
                }
                for (path, entry) in entries.by_ref() {
                    match predicate.evaluate(path, entry) {
                        Ok(true) => {
                            trace!(object_path = %path, "matched");
                            return Some(Ok((path, entry)));
                        }
                        Ok(false) => {}
                        Err(err) => {
                            *done = true;
                            return Some(Err(err));
                        }
                    }
                }
                *done = true;
                None
            }
        }
    }
}

impl FusedIterator for Search<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = "com.example.Widget";

    fn objects(json: &str) -> ManagedObjects {
        serde_json::from_str(json).unwrap()
    }

    fn widgets() -> ManagedObjects {
        objects(
            r#"{
                "/w/0": {"com.example.Widget": {"size": 3, "color": "red"}},
                "/w/1": {"com.example.Widget": {"size": 3, "color": "blue"}},
                "/w/2": {"com.example.Widget": {"size": 5, "color": "red"}},
                "/g/0": {"com.example.Gadget": {}}
            }"#,
        )
    }

    fn paths(query: &Query, objects: &ManagedObjects) -> Vec<String> {
        query
            .search_paths(objects)
            .unwrap()
            .into_iter()
            .map(ObjectPath::into_string)
            .collect()
    }

    #[test]
    fn empty_query_returns_implementers() {
        let q = Query::unchecked(WIDGET, Vec::<(String, Value)>::new());
        assert_eq!(paths(&q, &widgets()), vec!["/w/0", "/w/1", "/w/2"]);
    }

    #[test]
    fn search_is_restartable() {
        let data = widgets();
        let q = Query::unchecked(WIDGET, [("size", 3)]);
        let first: Vec<_> = q.search(&data).unwrap().collect();
        let second: Vec<_> = q.search(&data).unwrap().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn lazy_search_yields_matches_before_error() {
        let data = objects(
            r#"{
                "/w/0": {"com.example.Widget": {"size": 3, "color": "red"}},
                "/w/1": {"com.example.Widget": {"size": 3}},
                "/w/2": {"com.example.Widget": {"size": 3, "color": "red"}}
            }"#,
        );
        let q = Query::unchecked(WIDGET, [("size", Value::from(3)), ("color", Value::from("red"))]);
        let mut search = q.search(&data).unwrap();

        let (path, _) = search.next().unwrap().unwrap();
        assert_eq!(path.as_str(), "/w/0");
        let err = search.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::MissingSearchProperties { ref object_path, .. } if object_path.as_str() == "/w/1"
        ));
        // Fused after the error.
        assert!(search.next().is_none());
        assert!(search.next().is_none());
    }

    #[test]
    fn unique_match_success() {
        let data = objects(r#"{"op": {"interface_name": {"prop_name": "prop_value"}}}"#);
        let q = Query::unchecked("interface_name", [("prop_name", "prop_value")]).require_unique_match();
        let found: Vec<_> = q.search(&data).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.as_str(), "op");
        assert_eq!(found[0].1, &data["op"]);
    }

    #[test]
    fn unique_match_failure_on_empty_result() {
        let q = Query::unchecked("interface_name", [("prop_name", "prop_value")]).require_unique_match();
        let err = q.search(&ManagedObjects::new()).unwrap_err();
        match err {
            RuntimeError::SearchCondition(SearchConditionError::UniqueResult {
                interface_name,
                props,
                result,
            }) => {
                assert_eq!(interface_name, "interface_name");
                assert_eq!(props["prop_name"], Value::from("prop_value"));
                assert!(result.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unique_match_failure_lists_all_matches() {
        let q = Query::unchecked(WIDGET, [("size", 3)]).require_unique_match();
        let err = q.search(&widgets()).unwrap_err();
        let RuntimeError::SearchCondition(SearchConditionError::UniqueResult { result, .. }) = err else {
            panic!("expected unique result error");
        };
        let found: Vec<_> = result.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(found, vec!["/w/0", "/w/1"]);
    }

    #[test]
    fn unique_search_propagates_data_errors() {
        let data = objects(
            r#"{
                "/w/0": {"com.example.Widget": {"size": 3, "color": "red"}},
                "/w/1": {"com.example.Widget": {"size": 3}}
            }"#,
        );
        let q = Query::unchecked(WIDGET, [("size", Value::from(3)), ("color", Value::from("red"))])
            .require_unique_match();
        assert!(matches!(
            q.search(&data),
            Err(RuntimeError::MissingSearchProperties { .. })
        ));
    }

    #[test]
    fn conjunction_intersects() {
        let data = widgets();
        let size = Query::unchecked(WIDGET, [("size", 3)]);
        let red = Query::unchecked(WIDGET, [("color", "red")]);
        assert_eq!(paths(&size.conjunction(&red), &data), vec!["/w/0"]);
    }

    #[test]
    fn disjunction_unites() {
        let data = widgets();
        let blue = Query::unchecked(WIDGET, [("color", "blue")]);
        let five = Query::unchecked(WIDGET, [("size", 5)]);
        assert_eq!(paths(&blue.disjunction(&five), &data), vec!["/w/1", "/w/2"]);
    }

    #[test]
    fn negation_complements() {
        let data = widgets();
        let red = Query::unchecked(WIDGET, [("color", "red")]);
        // Non-implementers fail the inner match, so they pass the negation.
        assert_eq!(paths(&red.negation(), &data), vec!["/g/0", "/w/1"]);
        let within = red.negation().conjunction(&Query::unchecked(WIDGET, Vec::<(String, Value)>::new()));
        assert_eq!(paths(&within, &data), vec!["/w/1"]);
    }

    #[test]
    fn composition_drops_uniqueness() {
        let q = Query::unchecked(WIDGET, [("size", 3)]).require_unique_match();
        assert!(q.is_unique());
        assert!(!q.negation().is_unique());
        assert!(!q.conjunction(&q).is_unique());
        assert!(q.conjunction(&q).require_unique_match().is_unique());
    }

    #[test]
    fn matches_single_entry() {
        let q = Query::unchecked(WIDGET, [("size", 3)]);
        let data = widgets();
        let path = ObjectPath::from("/w/2");
        assert!(!q.matches(&path, &data["/w/2"]).unwrap());
        assert!(!q.matches(&path, &ObjectEntry::new()).unwrap());
    }
}
