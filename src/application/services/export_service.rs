//! CSV export of a result set.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::domain::entities::College;
use crate::error::AppError;

pub const CSV_HEADER: &str =
    "Name,Year Founded,City,State,Type,Rating,Enrollment,Tuition,Acceptance Rate";

/// File name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("colleges_{}.csv", date.format("%Y-%m-%d"))
}

/// Renders `colleges` as CSV, header included, rows in the given order.
///
/// Text columns, the type included, are quoted; missing optional values are
/// empty cells.
pub fn render_csv(colleges: &[College]) -> String {
    let mut out = String::with_capacity(64 * (colleges.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for college in colleges {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            quote(&college.name),
            college.year_founded,
            quote(&college.city),
            quote(&college.state),
            college
                .college_type
                .map(|t| quote(t.as_str()))
                .unwrap_or_default(),
            optional(college.rating),
            optional(college.enrollment),
            optional(college.tuition),
            optional(college.acceptance_rate),
        );
    }

    out
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes `colleges` to `dir/colleges_<date>.csv` and returns the path.
///
/// # Errors
///
/// - [`AppError::Validation`] if `colleges` is empty (nothing is written)
/// - [`AppError::Storage`] if the directory or file cannot be written
pub async fn export_csv(
    colleges: &[College],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, AppError> {
    if colleges.is_empty() {
        return Err(AppError::validation("No results to export"));
    }

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(date));
    tokio::fs::write(&path, render_csv(colleges)).await?;

    info!("Exported {} colleges to {}", colleges.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CollegeType;

    #[test]
    fn test_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "colleges_2024-03-07.csv");
    }

    #[test]
    fn test_render_quotes_and_empty_optionals() {
        let mut full = College::new("Texas A&M", 1876, "College Station", "Texas", "")
            .with_type(CollegeType::Public)
            .with_rating(4.2);
        full.enrollment = Some(72982);
        full.tuition = Some(13239);
        full.acceptance_rate = Some(63.0);
        let bare = College::new("The \"Best\" College", 1900, "Springfield", "Ohio", "");

        let csv = render_csv(&[full, bare]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            r#""Texas A&M",1876,"College Station","Texas","public",4.2,72982,13239,63"#
        );
        assert_eq!(
            lines[2],
            r#""The ""Best"" College",1900,"Springfield","Ohio",,,,,"#
        );
        assert_eq!(lines.len(), 3);
    }
}
