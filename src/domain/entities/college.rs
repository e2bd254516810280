//! College entity as returned by the backend and the local dataset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

/// Ownership type of a college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollegeType {
    Public,
    Private,
}

impl CollegeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollegeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(format!("unknown college type '{other}'")),
        }
    }
}

/// A college record.
///
/// `name` is the display key: favorites and the compare selection refer to
/// colleges by name. Optional attributes are absent on older backend records
/// and an empty `type` string decodes as `None`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct College {
    #[validate(length(min = 1))]
    pub name: String,
    pub year_founded: i32,
    pub city: String,
    pub state: String,
    /// Comma-delimited facility names.
    #[serde(default)]
    pub facilities: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(rename = "type", default)]
    pub college_type: Option<CollegeType>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub enrollment: Option<u32>,
    #[serde(default)]
    pub tuition: Option<u32>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
}

impl College {
    /// Creates a college with the mandatory attributes only.
    pub fn new(
        name: impl Into<String>,
        year_founded: i32,
        city: impl Into<String>,
        state: impl Into<String>,
        facilities: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            year_founded,
            city: city.into(),
            state: state.into(),
            facilities: facilities.into(),
            college_type: None,
            rating: None,
            enrollment: None,
            tuition: None,
            acceptance_rate: None,
        }
    }

    pub fn with_type(mut self, college_type: CollegeType) -> Self {
        self.college_type = Some(college_type);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Iterates the individual facility names, trimmed, skipping blanks.
    pub fn facility_list(&self) -> impl Iterator<Item = &str> {
        self.facilities
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_college_type_parse_is_case_insensitive() {
        assert_eq!("Public".parse::<CollegeType>(), Ok(CollegeType::Public));
        assert_eq!(" PRIVATE ".parse::<CollegeType>(), Ok(CollegeType::Private));
        assert!("community".parse::<CollegeType>().is_err());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "name": "Harvard University",
            "year_founded": 1636,
            "city": "Cambridge",
            "state": "Massachusetts",
            "facilities": "Library, Museum"
        }"#;

        let college: College = serde_json::from_str(json).unwrap();

        assert_eq!(college.name, "Harvard University");
        assert_eq!(college.year_founded, 1636);
        assert!(college.college_type.is_none());
        assert!(college.rating.is_none());
        assert_eq!(college.facility_list().collect::<Vec<_>>(), ["Library", "Museum"]);
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "name": "Stanford University",
            "year_founded": 1885,
            "city": "Stanford",
            "state": "California",
            "facilities": "Library,Stadium",
            "type": "private",
            "rating": 4.8,
            "enrollment": 17000,
            "tuition": 56000,
            "acceptance_rate": 4.3
        }"#;

        let college: College = serde_json::from_str(json).unwrap();

        assert_eq!(college.college_type, Some(CollegeType::Private));
        assert_eq!(college.rating, Some(4.8));
        assert_eq!(college.enrollment, Some(17000));
        assert!(college.validate().is_ok());
    }

    #[test]
    fn test_empty_type_is_none() {
        let json = r#"{"name":"X","year_founded":1900,"city":"A","state":"B","type":""}"#;
        let college: College = serde_json::from_str(json).unwrap();
        assert!(college.college_type.is_none());
        assert_eq!(college.facilities, "");
    }

    #[test]
    fn test_out_of_range_rating_fails_validation() {
        let college = College::new("X", 1900, "A", "B", "").with_rating(7.5);
        assert!(college.validate().is_err());
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let college = College::new("X", 1900, "A", "B", "").with_type(CollegeType::Public);
        let value = serde_json::to_value(&college).unwrap();
        assert_eq!(value["type"], "public");
    }
}
