//! Query builder: search form state to canonical query.

use std::fmt;

use url::form_urlencoded;

use crate::domain::entities::SearchParams;
use crate::domain::fields::{FIELD_TABLE, SearchField};

/// Ordered, blank-stripped `(field, trimmed value)` pairs.
///
/// Two canonical queries are equal exactly when they would produce the same
/// remote request, so equality doubles as the fetch-triggering condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CanonicalQuery {
    pairs: Vec<(SearchField, String)>,
}

impl CanonicalQuery {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Pairs in declared field order.
    pub fn pairs(&self) -> &[(SearchField, String)] {
        &self.pairs
    }

    /// Wire form of the pairs: `(query key, value)`.
    pub fn key_values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(f, v)| (f.key(), v.as_str()))
    }

    pub fn get(&self, field: SearchField) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Percent-encoded query string, e.g. `name=Harvard&state=Massachusetts`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.key_values())
            .finish()
    }

    /// Converts back to form state; fields absent from the query are blank.
    pub fn to_params(&self) -> SearchParams {
        self.pairs
            .iter()
            .fold(SearchParams::new(), |params, (field, value)| {
                params.with(*field, value.clone())
            })
    }
}

impl fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<empty>");
        }
        f.write_str(&self.to_query_string())
    }
}

/// Builds the canonical query for the given form state.
///
/// Walks [`FIELD_TABLE`] in declared order and keeps a field only when its
/// trimmed value is non-empty. Pure: the result depends only on the trimmed
/// field values.
pub fn build_query(params: &SearchParams) -> CanonicalQuery {
    let pairs = FIELD_TABLE
        .iter()
        .filter_map(|descriptor| {
            let value = params.get(descriptor.field).trim();
            (!value.is_empty()).then(|| (descriptor.field, value.to_string()))
        })
        .collect();

    CanonicalQuery { pairs }
}
