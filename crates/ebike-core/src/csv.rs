//! CSV parsing: raw text into [`RawRecord`](crate::RawRecord) rows.
//!
//! The input is split into lines first, so quoted fields cannot span lines.
//! Within a line, fields are separated by commas outside double quotes and a
//! doubled quote inside a quoted span stands for one literal quote.

use crate::types::RawRecord;
use std::mem::take;

/// Parse a CSV document whose first non-blank line is the header.
///
/// Blank and whitespace-only lines are ignored. Data rows whose field count
/// differs from the header are skipped. Header names and values are trimmed.
/// Returns an empty vector when there is no data row at all.
pub fn parse_rows(text: &str) -> Vec<RawRecord> {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = parse_line(header_line)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for line in lines {
        let values = parse_line(line);
        if values.len() != headers.len() {
            dropped += 1;
            continue;
        }
        rows.push(
            headers
                .iter()
                .zip(values)
                .map(|(h, v)| (h.clone(), v.trim().to_string()))
                .collect(),
        );
    }

    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept = rows.len(),
            columns = headers.len(),
            "skipped rows with mismatched field count"
        );
    }

    rows
}

/// Split one CSV line into its fields.
///
/// The trailing field is always emitted, so `"a,"` yields `["a", ""]` and an
/// empty line yields `[""]`.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next(); // escaped quote
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(take(&mut field)),
            _ => field.push(ch),
        }
    }

    // Unterminated quotes simply run to end of line.
    fields.push(field);
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
