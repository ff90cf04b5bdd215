//! Roster parsing: delimited text into typed [`EmployeeRecord`]s.
//!
//! The parser is strict about structure and lenient about values:
//! - Headers and values are trimmed before use.
//! - A row with the wrong number of fields, or without an id, is an issue.
//!   Any issue fails the whole batch.
//! - An empty manager marks the root.
//! - A salary that is not a finite number becomes `0`.
//! - Blank lines are skipped.

mod columns;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::diagnostic::{OrgError, ParseIssue, ParseIssueKind, RowLocation};
use crate::model::EmployeeRecord;

use columns::ColumnLayout;

/// Everything read from a roster, including rows that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Well-formed rows, in input order.
    pub records: Vec<EmployeeRecord>,
    /// Structural problems, in input order.
    pub issues: Vec<ParseIssue>,
}

impl ParseOutcome {
    /// Converts into the record list, failing if any row had an issue.
    pub fn into_records(self) -> Result<Vec<EmployeeRecord>, OrgError> {
        if self.issues.is_empty() {
            Ok(self.records)
        } else {
            Err(OrgError::MalformedInput {
                issues: self.issues,
            })
        }
    }
}

/// Parses roster text, rejecting the batch if any row is malformed.
pub fn parse(text: &str, config: &EngineConfig) -> Result<Vec<EmployeeRecord>, OrgError> {
    parse_rows(text, config)?.into_records()
}

/// Parses roster text, collecting row issues instead of failing on them.
///
/// Only a missing `Employee Id` column or an unreadable header fails here.
pub fn parse_rows(text: &str, config: &EngineConfig) -> Result<ParseOutcome, OrgError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (text, skipped) = skip_leading_blank_lines(text);
    let delimiter = config.delimiter.resolve(text);
    let line_of = |position: Option<&csv::Position>| position.map(|p| p.line() + skipped);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| OrgError::MalformedInput {
            issues: vec![ParseIssue {
                location: RowLocation::new(0, line_of(e.position())),
                kind: ParseIssueKind::Unreadable {
                    message: format!("unreadable header: {}", e),
                },
            }],
        })?
        .clone();
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut outcome = ParseOutcome::default();
    let mut rows = 0usize;

    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        rows = row;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                outcome.issues.push(ParseIssue {
                    location: RowLocation::new(row, line_of(e.position())),
                    kind: ParseIssueKind::Unreadable {
                        message: e.to_string(),
                    },
                });
                continue;
            }
        };
        let location = RowLocation::new(row, line_of(record.position()));

        // Whitespace-only lines come back as a single empty field.
        if record.len() == 1 && record[0].is_empty() {
            trace!(%location, "skipping blank line");
            continue;
        }

        if record.len() != layout.width() {
            outcome.issues.push(ParseIssue {
                location,
                kind: ParseIssueKind::FieldCount {
                    expected: layout.width(),
                    found: record.len(),
                },
            });
            continue;
        }

        match layout.to_record(&record) {
            Some(employee) => outcome.records.push(employee),
            None => outcome.issues.push(ParseIssue {
                location,
                kind: ParseIssueKind::MissingId,
            }),
        }
    }

    debug!(
        delimiter = %(delimiter as char).escape_default(),
        rows,
        records = outcome.records.len(),
        issues = outcome.issues.len(),
        "parsed roster"
    );

    Ok(outcome)
}

/// Drops whitespace-only lines ahead of the header, returning the rest and
/// how many lines were dropped.
fn skip_leading_blank_lines(mut text: &str) -> (&str, u64) {
    let mut skipped = 0;
    while let Some(end) = text.find('\n') {
        if !text[..end].trim().is_empty() {
            return (text, skipped);
        }
        text = &text[end + 1..];
        skipped += 1;
    }
    if text.trim().is_empty() {
        ("", skipped)
    } else {
        (text, skipped)
    }
}

/// Lenient numeric coercion: decimal, exponent and `0x`/`0o`/`0b` integer
/// literals are read as-is (negatives included); anything else, and any
/// non-finite result, is `0`.
pub fn coerce_salary(raw: &str) -> f64 {
    let radix_literal = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|&(prefix, radix)| raw.strip_prefix(prefix).map(|digits| (digits, radix)));

    let value = match radix_literal {
        Some((digits, radix)) => u64::from_str_radix(digits, radix).ok().map(|v| v as f64),
        None => raw.parse::<f64>().ok(),
    };

    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
