//! Search field descriptor table.
//!
//! Every search form field is described once here: its query key, the kind of
//! value it carries and the comparator the local fallback filter applies. The
//! query builder and the fallback filter both walk [`FIELD_TABLE`], so the
//! remote and local interpretations of a field cannot drift apart.

use std::fmt;
use std::str::FromStr;

/// The fixed set of search form fields, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchField {
    Name,
    City,
    Year,
    State,
    Facility,
    CollegeType,
    MinYear,
    MaxYear,
    MinRating,
}

/// Kind of value a field carries once coerced from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Enum,
}

/// How the fallback filter compares a field value against a college.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Case-insensitive substring match on a text attribute.
    ContainsIgnoreCase,
    /// Numeric equality with the founding year, or a substring of its digits.
    YearMatch,
    /// Inclusive lower bound.
    AtLeast,
    /// Inclusive upper bound.
    AtMost,
    /// Exact match after parsing.
    Exact,
}

/// Describes one search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: SearchField,
    /// Query-string key sent to the backend.
    pub key: &'static str,
    pub kind: FieldKind,
    pub comparator: Comparator,
    /// Human-readable label used by the terminal front end.
    pub label: &'static str,
}

/// All fields in declared order. Canonical queries follow this order.
pub const FIELD_TABLE: [FieldDescriptor; 9] = [
    FieldDescriptor {
        field: SearchField::Name,
        key: "name",
        kind: FieldKind::Text,
        comparator: Comparator::ContainsIgnoreCase,
        label: "College name",
    },
    FieldDescriptor {
        field: SearchField::City,
        key: "city",
        kind: FieldKind::Text,
        comparator: Comparator::ContainsIgnoreCase,
        label: "City",
    },
    FieldDescriptor {
        field: SearchField::Year,
        key: "year",
        kind: FieldKind::Integer,
        comparator: Comparator::YearMatch,
        label: "Year founded",
    },
    FieldDescriptor {
        field: SearchField::State,
        key: "state",
        kind: FieldKind::Text,
        comparator: Comparator::ContainsIgnoreCase,
        label: "State",
    },
    FieldDescriptor {
        field: SearchField::Facility,
        key: "facility",
        kind: FieldKind::Text,
        comparator: Comparator::ContainsIgnoreCase,
        label: "Facility",
    },
    FieldDescriptor {
        field: SearchField::CollegeType,
        key: "collegeType",
        kind: FieldKind::Enum,
        comparator: Comparator::Exact,
        label: "Type",
    },
    FieldDescriptor {
        field: SearchField::MinYear,
        key: "minYear",
        kind: FieldKind::Integer,
        comparator: Comparator::AtLeast,
        label: "Founded after",
    },
    FieldDescriptor {
        field: SearchField::MaxYear,
        key: "maxYear",
        kind: FieldKind::Integer,
        comparator: Comparator::AtMost,
        label: "Founded before",
    },
    FieldDescriptor {
        field: SearchField::MinRating,
        key: "minRating",
        kind: FieldKind::Decimal,
        comparator: Comparator::AtLeast,
        label: "Minimum rating",
    },
];

impl SearchField {
    /// All fields in declared order.
    pub fn all() -> impl Iterator<Item = SearchField> {
        FIELD_TABLE.iter().map(|d| d.field)
    }

    pub fn descriptor(self) -> &'static FieldDescriptor {
        // FIELD_TABLE is indexed by declaration order of the enum.
        &FIELD_TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Looks a field up by its query key (case-sensitive, as sent on the wire).
    pub fn from_key(key: &str) -> Option<SearchField> {
        FIELD_TABLE.iter().find(|d| d.key == key).map(|d| d.field)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SearchField {
    type Err = String;

    /// Accepts the query key in any case, plus `type` and `facilities` as
    /// aliases typed by users.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Some(field) = FIELD_TABLE
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(wanted))
            .map(|d| d.field)
        {
            return Ok(field);
        }
        match wanted.to_ascii_lowercase().as_str() {
            "type" => Ok(SearchField::CollegeType),
            "facilities" => Ok(SearchField::Facility),
            _ => Err(format!("unknown search field '{wanted}'")),
        }
    }
}
