//! Search form state.

use serde::{Deserialize, Serialize};

use crate::domain::fields::SearchField;

/// Raw text of every search form field.
///
/// Values are kept exactly as typed; trimming and numeric coercion happen when
/// the canonical query is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub name: String,
    pub city: String,
    pub year: String,
    pub state: String,
    pub facility: String,
    pub college_type: String,
    pub min_year: String,
    pub max_year: String,
    pub min_rating: String,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: SearchField) -> &str {
        match field {
            SearchField::Name => &self.name,
            SearchField::City => &self.city,
            SearchField::Year => &self.year,
            SearchField::State => &self.state,
            SearchField::Facility => &self.facility,
            SearchField::CollegeType => &self.college_type,
            SearchField::MinYear => &self.min_year,
            SearchField::MaxYear => &self.max_year,
            SearchField::MinRating => &self.min_rating,
        }
    }

    fn slot_mut(&mut self, field: SearchField) -> &mut String {
        match field {
            SearchField::Name => &mut self.name,
            SearchField::City => &mut self.city,
            SearchField::Year => &mut self.year,
            SearchField::State => &mut self.state,
            SearchField::Facility => &mut self.facility,
            SearchField::CollegeType => &mut self.college_type,
            SearchField::MinYear => &mut self.min_year,
            SearchField::MaxYear => &mut self.max_year,
            SearchField::MinRating => &mut self.min_rating,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(mut self, field: SearchField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = value.into();
        self
    }

    pub fn set(&mut self, field: SearchField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_every_field() {
        let mut params = SearchParams::new();
        for field in SearchField::all() {
            params.set(field, field.key());
        }
        for field in SearchField::all() {
            assert_eq!(params.get(field), field.key());
        }
    }

    #[test]
    fn test_deserialize_camel_case_keys() {
        let params: SearchParams =
            serde_json::from_str(r#"{"collegeType":"public","minYear":"1800"}"#).unwrap();
        assert_eq!(params.college_type, "public");
        assert_eq!(params.min_year, "1800");
        assert_eq!(params.name, "");
    }
}
