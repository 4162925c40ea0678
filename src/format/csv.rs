// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! CSV export and import.
//!
//! Exports carry match data only: one row per record with a human match type label and
//! character names. Imports accept that shape or the split `Parent Type`/`Child Type` variant,
//! mapping labels and names back to catalog ids.

use serde_json::Value;

use crate::model::{Catalog, MatchLog, MatchRecord};

use super::json::{PendingRecord, RawMatchRecord, RecordProblem};
use super::{format_timestamp, FormatError};

pub const EXPORT_HEADER: [&str; 4] = ["Timestamp", "Match Type", "Result", "Heroes"];

const CHARACTER_SEPARATOR: &str = "; ";

pub fn export_csv(log: &MatchLog, catalog: &Catalog) -> String {
    let mut out = EXPORT_HEADER.join(",");
    out.push('\n');
    for record in log.all() {
        let row = export_row(record, catalog);
        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn export_row(record: &MatchRecord, catalog: &Catalog) -> [String; 4] {
    let label = catalog.match_type_label(
        record.parent.as_str(),
        record.child.as_ref().map(|child| child.as_str()),
    );
    let names: Vec<&str> = record
        .characters
        .iter()
        .map(|id| {
            catalog
                .character(id.as_str())
                .map_or(id.as_str(), |character| character.display_name())
        })
        .collect();
    [
        format_timestamp(record.timestamp),
        label,
        record.result.as_str().to_owned(),
        names.join(CHARACTER_SEPARATOR),
    ]
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', ';', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}

/// Splits CSV text into rows of cells. Quoted cells may contain separators, doubled quotes,
/// and line breaks. Blank lines are dropped.
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(std::mem::take(&mut cell).trim().to_owned()),
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut cell).trim().to_owned());
                push_row(&mut rows, std::mem::take(&mut row));
            }
            _ => cell.push(ch),
        }
    }
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell.trim().to_owned());
        push_row(&mut rows, row);
    }
    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|cell| !cell.is_empty()) {
        rows.push(row);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    timestamp: usize,
    result: usize,
    parent: Option<usize>,
    child: Option<usize>,
    match_type: Option<usize>,
    characters: Option<usize>,
}

impl Columns {
    fn detect(header: &[String]) -> Result<Self, FormatError> {
        let lowered: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
        let find = |needle: &str| lowered.iter().position(|h| h.contains(needle));

        let timestamp = find("timestamp");
        let result = find("result");
        let (Some(timestamp), Some(result)) = (timestamp, result) else {
            return Err(FormatError::MissingColumns(vec!["Timestamp", "Result"]));
        };
        Ok(Self {
            timestamp,
            result,
            parent: find("parent"),
            child: find("child"),
            match_type: lowered.iter().position(|h| {
                h.contains("type") && !h.contains("parent") && !h.contains("child")
            }),
            characters: find("hero").or_else(|| find("character")),
        })
    }
}

/// Parses a CSV import into validated records, one result per data row.
///
/// Fails as a whole only when the header is unusable or there are no data rows.
pub fn parse_csv(
    text: &str,
    catalog: &Catalog,
) -> Result<Vec<Result<PendingRecord, RecordProblem>>, FormatError> {
    let rows = split_rows(text.trim());
    let Some((header, data)) = rows.split_first() else {
        return Err(FormatError::Empty);
    };
    if data.is_empty() {
        return Err(FormatError::Empty);
    }
    let columns = Columns::detect(header)?;

    Ok(data
        .iter()
        .enumerate()
        .map(|(i, row)| {
            raw_from_row(row, columns, catalog)
                .normalize(catalog)
                .map_err(|problems| RecordProblem {
                    position: i + 1,
                    problems,
                })
        })
        .collect())
}

fn raw_from_row(row: &[String], columns: Columns, catalog: &Catalog) -> RawMatchRecord {
    let cell = |idx: Option<usize>| {
        idx.and_then(|idx| row.get(idx))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    };

    let mut raw = RawMatchRecord {
        timestamp: cell(Some(columns.timestamp)).map(|ts| Value::String(ts.to_owned())),
        result: cell(Some(columns.result)).map(str::to_lowercase),
        ..RawMatchRecord::default()
    };

    if let Some(parent_cell) = cell(columns.parent) {
        let parent = parent_by_label(catalog, parent_cell);
        raw.parent_type = Some(parent.map_or(parent_cell, |p| p.id().as_str()).to_owned());
        raw.child_type = cell(columns.child).map(|child_cell| {
            parent
                .and_then(|parent| {
                    parent.children().iter().find(|child| {
                        eq_ignore_case(child.label(), child_cell) || child.id().as_str() == child_cell
                    })
                })
                .map_or(child_cell, |child| child.id().as_str())
                .to_owned()
        });
    } else if let Some(label) = cell(columns.match_type) {
        match match_type_by_label(catalog, label) {
            Some((parent, child)) => {
                raw.parent_type = Some(parent);
                raw.child_type = child;
            }
            None => raw.legacy_type = Some(label.to_owned()),
        }
    }

    raw.heroes = cell(columns.characters).map(|names| {
        names
            .split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                catalog
                    .characters()
                    .iter()
                    .find(|c| eq_ignore_case(c.display_name(), name) || c.id().as_str() == name)
                    .map_or(name, |c| c.id().as_str())
                    .to_owned()
            })
            .collect()
    });

    raw
}

fn parent_by_label<'c>(
    catalog: &'c Catalog,
    cell: &str,
) -> Option<&'c crate::model::MatchTypeNode> {
    catalog
        .match_types()
        .iter()
        .find(|parent| eq_ignore_case(parent.label(), cell) || parent.id().as_str() == cell)
}

/// Maps an exported match type label back to `(parent, child)` ids.
fn match_type_by_label(catalog: &Catalog, label: &str) -> Option<(String, Option<String>)> {
    if let Some(parent) = parent_by_label(catalog, label) {
        return Some((parent.id().as_str().to_owned(), None));
    }
    for parent in catalog.match_types() {
        for child in parent.children() {
            let exported =
                catalog.match_type_label(parent.id().as_str(), Some(child.id().as_str()));
            if eq_ignore_case(&exported, label) {
                return Some((
                    parent.id().as_str().to_owned(),
                    Some(child.id().as_str().to_owned()),
                ));
            }
        }
    }
    None
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
