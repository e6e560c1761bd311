use std::sync::OnceLock;

use regex::Regex;

use crate::model::{ColumnMap, RawTable};
use crate::normalize::collapse_whitespace;

/// Rows scanned from the top of a table while looking for the header row.
const HEADER_SCAN_LIMIT: usize = 20;

/// Column label synonyms, matched as substrings of the normalized
/// header cell. Misspellings observed in real agreements are included.
const ACTIVITY_SYNONYMS: &[&str] = &["activity", "activitiy", "acti vity", "actvity"];
const DESCRIPTION_SYNONYMS: &[&str] = &["description", "descr", "desription"];
const AMOUNT_SYNONYMS: &[&str] = &[
    "up to amount (usd)",
    "up to amount",
    "amount (usd)",
    "amount",
    "budget (usd)",
    "budget",
    "total amount (usd)",
    "max amount (usd)",
];

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\d{1,3}(?:,\d{3})+(?:\.\d+)?").expect("hardcoded currency regex is valid")
    })
}

fn normalize_header(cell: &str) -> String {
    collapse_whitespace(cell).to_lowercase()
}

/// Locate the header row: the first of the leading rows whose joined
/// cell text contains both an "activ" and a "descr" fragment. Falls
/// back to row 0 when nothing qualifies.
fn find_header_row(rows: &[Vec<String>]) -> usize {
    for (index, row) in rows.iter().take(HEADER_SCAN_LIMIT).enumerate() {
        let joined = row
            .iter()
            .map(|cell| cell.trim())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if joined.contains("activ") && joined.contains("descr") {
            return index;
        }
    }
    0
}

fn contains_any(header: &str, synonyms: &[&str]) -> bool {
    synonyms.iter().any(|synonym| header.contains(synonym))
}

/// Score every column by how many data cells look like a grouped
/// currency value; used when no header cell named the amount column.
fn amount_column_by_content(data: &[Vec<String>], width: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for column in 0..width {
        let score = data
            .iter()
            .filter(|row| {
                row.get(column)
                    .is_some_and(|cell| currency_re().is_match(cell))
            })
            .count();
        // strictly-greater keeps the first-seen column on ties
        if score > 0 && best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, column));
        }
    }
    best.map(|(_, column)| column)
}

/// Resolve a raw table into its data rows and a role-to-column map.
///
/// Degrades gracefully: an unrecognizable header leaves roles absent
/// rather than failing, so the assembler can fall back to continuation
/// state or skip the table.
pub fn resolve(table: &RawTable) -> (Vec<Vec<String>>, ColumnMap) {
    if table.rows.is_empty() {
        return (Vec::new(), ColumnMap::default());
    }
    let header_row = find_header_row(&table.rows);
    let header: Vec<String> = table.rows[header_row].iter().map(|c| normalize_header(c)).collect();
    let data: Vec<Vec<String>> = table.rows[header_row + 1..].to_vec();

    let mut map = ColumnMap::default();
    for (index, cell) in header.iter().enumerate() {
        if map.activity.is_none() && contains_any(cell, ACTIVITY_SYNONYMS) {
            map.activity = Some(index);
        }
        if map.description.is_none() && contains_any(cell, DESCRIPTION_SYNONYMS) {
            map.description = Some(index);
        }
        if map.amount.is_none() && contains_any(cell, AMOUNT_SYNONYMS) {
            map.amount = Some(index);
        }
    }

    if map.amount.is_none() && !data.is_empty() {
        map.amount = amount_column_by_content(&data, header.len());
    }

    (data, map)
}
