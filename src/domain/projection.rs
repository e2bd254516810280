//! View projection: sorting, pagination and aggregate statistics.
//!
//! Everything here is a pure function of the current result set. Nothing is
//! cached, so the displayed page and statistics can never drift from the
//! results they describe.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::College;

/// Number of colleges shown per page.
pub const PAGE_SIZE: usize = 12;

/// Sort order of the displayed results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Name,
    /// Newest founding year first.
    Year,
    City,
    State,
    /// Highest rating first; unrated colleges last.
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Year => "year",
            Self::City => "city",
            Self::State => "state",
            Self::Rating => "rating",
        }
    }

    fn compare(&self, a: &College, b: &College) -> Ordering {
        match self {
            Self::Name => compare_text(&a.name, &b.name),
            Self::City => compare_text(&a.city, &b.city),
            Self::State => compare_text(&a.state, &b.state),
            Self::Year => b.year_founded.cmp(&a.year_founded),
            Self::Rating => {
                let a = a.rating.unwrap_or(f64::NEG_INFINITY);
                let b = b.rating.unwrap_or(f64::NEG_INFINITY);
                b.total_cmp(&a)
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "year" => Ok(Self::Year),
            "city" => Ok(Self::City),
            "state" => Ok(Self::State),
            "rating" => Ok(Self::Rating),
            other => Err(format!(
                "unknown sort key '{other}' (expected name, year, city, state or rating)"
            )),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Returns a new vector sorted by `key`. The sort is stable.
pub fn sort_colleges(colleges: &[College], key: SortKey) -> Vec<College> {
    let mut sorted = colleges.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<College>,
    /// 1-based page index actually used.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Clamps a requested page to `1..=total_pages` (page 1 when there are no items).
pub fn clamp_page(page: usize, count: usize) -> usize {
    page.clamp(1, total_pages(count).max(1))
}

/// Slices page `page` (1-based) out of `colleges`.
///
/// Page 0 is treated as page 1. A page past the end is empty.
pub fn paginate(colleges: &[College], page: usize) -> Page {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE).min(colleges.len());
    let end = start.saturating_add(PAGE_SIZE).min(colleges.len());

    Page {
        items: colleges[start..end].to_vec(),
        page,
        total_pages: total_pages(colleges.len()),
        total_items: colleges.len(),
    }
}

/// Sorts then paginates in one step.
pub fn project(colleges: &[College], key: SortKey, page: usize) -> Page {
    paginate(&sort_colleges(colleges, key), page)
}

/// Aggregate statistics over a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultStats {
    pub total: usize,
    pub average_year: Option<f64>,
    /// Distinct states, compared case-insensitively.
    pub distinct_states: usize,
    /// Average over colleges that have a rating.
    pub average_rating: Option<f64>,
}

pub fn compute_stats(colleges: &[College]) -> ResultStats {
    let total = colleges.len();

    let average_year = (total > 0).then(|| {
        colleges.iter().map(|c| f64::from(c.year_founded)).sum::<f64>() / total as f64
    });

    let distinct_states = colleges
        .iter()
        .map(|c| c.state.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    let ratings: Vec<f64> = colleges.iter().filter_map(|c| c.rating).collect();
    let average_rating =
        (!ratings.is_empty()).then(|| ratings.iter().sum::<f64>() / ratings.len() as f64);

    ResultStats {
        total,
        average_year,
        distinct_states,
        average_rating,
    }
}
