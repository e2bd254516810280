//! Local fallback filter.
//!
//! Evaluates a canonical query against in-memory colleges with the semantics
//! the backend is expected to implement. A college is kept only if it
//! satisfies every supplied field (logical AND). Comparators come from the
//! field descriptor table.

use crate::domain::entities::{College, CollegeType};
use crate::domain::fields::{Comparator, FieldKind, SearchField};
use crate::domain::query::CanonicalQuery;

/// Returns true when `college` satisfies every pair of `query`.
///
/// An empty query matches everything; callers short-circuit empty queries
/// before reaching the filter.
pub fn matches(college: &College, query: &CanonicalQuery) -> bool {
    query
        .pairs()
        .iter()
        .all(|(field, value)| field_matches(college, *field, value))
}

/// Filters `colleges` into a new vector, preserving order.
pub fn filter_colleges(colleges: &[College], query: &CanonicalQuery) -> Vec<College> {
    colleges
        .iter()
        .filter(|c| matches(c, query))
        .cloned()
        .collect()
}

fn field_matches(college: &College, field: SearchField, value: &str) -> bool {
    let descriptor = field.descriptor();

    match (descriptor.comparator, descriptor.kind) {
        (Comparator::ContainsIgnoreCase, _) => {
            contains_ignore_case(text_attribute(college, field), value)
        }
        (Comparator::YearMatch, _) => year_matches(college.year_founded, value),
        (Comparator::AtLeast, FieldKind::Decimal) => match (college.rating, parse_decimal(value)) {
            (Some(rating), Some(min)) => rating >= min,
            _ => false,
        },
        (Comparator::AtLeast, _) => {
            parse_integer(value).is_some_and(|min| college.year_founded >= min)
        }
        (Comparator::AtMost, _) => {
            parse_integer(value).is_some_and(|max| college.year_founded <= max)
        }
        (Comparator::Exact, _) => value
            .parse::<CollegeType>()
            .is_ok_and(|wanted| college.college_type == Some(wanted)),
    }
}

fn text_attribute(college: &College, field: SearchField) -> &str {
    match field {
        SearchField::Name => &college.name,
        SearchField::City => &college.city,
        SearchField::State => &college.state,
        SearchField::Facility => &college.facilities,
        _ => "",
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn year_matches(year_founded: i32, value: &str) -> bool {
    if parse_integer(value) == Some(year_founded) {
        return true;
    }
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit())
        && year_founded.to_string().contains(value)
}

fn parse_integer(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
