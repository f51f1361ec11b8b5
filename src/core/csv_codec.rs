//! Comma-separated export/import.
//!
//! Fields are never quoted or escaped: a comma inside a value splits it into
//! two columns on the way back in. Files written by other copies of the
//! roster rely on this exact layout, so it is kept as is.

use crate::domain::model::StudentRecord;
use crate::utils::error::{DataFormat, Result, RosterError};
use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use regex::Regex;
use std::sync::LazyLock;

pub const CSV_HEADER: [&str; 8] = [
    "LastName",
    "FirstName",
    "MiddleName",
    "Course",
    "Group",
    "BirthDate",
    "Email",
    "Phone",
];

pub const CSV_DATE_FORMAT: &str = "%d.%m.%Y";

const COLUMN_COUNT: usize = CSV_HEADER.len();

static CSV_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("valid date pattern"));

pub fn serialize_csv(records: &[StudentRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let course = record.course.to_string();
        let birth_date = record.birth_date.format(CSV_DATE_FORMAT).to_string();
        writer.write_record([
            record.last_name.as_str(),
            record.first_name.as_str(),
            record.middle_name.as_str(),
            course.as_str(),
            record.group.as_str(),
            birth_date.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::IoError(std::io::Error::new(e.error().kind(), e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| RosterError::parse(DataFormat::Csv, e.to_string()))
}

/// Parses exported CSV text.
///
/// The first line is always treated as the header and skipped. Lines with
/// fewer than eight values are dropped silently; values past the eighth are
/// ignored. A bad course or birth date on any kept line rejects the whole
/// input.
pub fn parse_csv(text: &str) -> Result<Vec<StudentRecord>> {
    let body = skip_first_line(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row.map_err(|e| RosterError::parse(DataFormat::Csv, e.to_string()))?;
        // The reader does not count the blank lines it skips, so the line is
        // recovered from the byte offset. The body starts on line 2.
        let offset = row.position().map(|p| p.byte() as usize).unwrap_or_default();
        let line = 2 + body.get(..offset).map(count_line_breaks).unwrap_or_default();

        if row.len() < COLUMN_COUNT {
            tracing::debug!("Skipping CSV line {}: {} of {} values", line, row.len(), COLUMN_COUNT);
            skipped += 1;
            continue;
        }

        records.push(record_from_row(&row, line)?);
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} CSV lines with fewer than {} values", skipped, COLUMN_COUNT);
    }
    tracing::debug!("Parsed {} records from CSV", records.len());

    Ok(records)
}

fn record_from_row(row: &StringRecord, line: usize) -> Result<StudentRecord> {
    let value = |i: usize| row.get(i).unwrap_or_default();

    let course = value(3).trim().parse::<i32>().map_err(|_| {
        RosterError::parse(
            DataFormat::Csv,
            format!("line {}: Course '{}' is not an integer", line, value(3)),
        )
    })?;

    let birth_date = parse_csv_date(value(5)).ok_or_else(|| {
        RosterError::parse(
            DataFormat::Csv,
            format!("line {}: BirthDate '{}' does not match dd.mm.yyyy", line, value(5)),
        )
    })?;

    Ok(StudentRecord {
        last_name: value(0).to_string(),
        first_name: value(1).to_string(),
        middle_name: value(2).to_string(),
        course,
        group: value(4).to_string(),
        birth_date,
        email: value(6).to_string(),
        phone: value(7).to_string(),
    })
}

/// Everything after the first line. `\r\n`, `\n` and a lone `\r` all end a
/// line, matching the reader's terminator handling.
fn skip_first_line(text: &str) -> &str {
    match text.find(['\r', '\n']) {
        Some(i) if text[i..].starts_with("\r\n") => &text[i + 2..],
        Some(i) => &text[i + 1..],
        None => "",
    }
}

fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}

/// Strict `dd.mm.yyyy`: two-digit day and month, four-digit year.
pub fn parse_csv_date(raw: &str) -> Option<NaiveDate> {
    if !CSV_DATE_SHAPE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, CSV_DATE_FORMAT).ok()
}
