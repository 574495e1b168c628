// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::error::{LoadError, LoadResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One data row keyed by column name. A column may be missing from a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    cells: IndexMap<String, String>,
}
impl Record {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
    /// Cell as display text; missing cells read as empty.
    pub fn text(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
/// Pairs fields with headers by position. A repeated header keeps the field
/// of its first occurrence.
fn record_from_fields<'a>(headers: &[String], fields: impl Iterator<Item = &'a str>) -> Record {
    let mut record = Record::new();
    for (header, value) in headers.iter().zip(fields) {
        record
            .cells
            .entry(header.clone())
            .or_insert_with(|| value.to_string());
    }
    record
}
/// A column projected out of a table, one entry per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub name: &'a str,
    pub values: Vec<Option<&'a str>>,
}
impl Column<'_> {
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
/// Rows of a single load, with the header order that defines the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}
impl Table {
    /// Builds a table; repeated column names are dropped after their first
    /// occurrence.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(columns.len());
        for column in columns {
            if !unique.contains(&column) {
                unique.push(column);
            }
        }
        Self {
            columns: unique,
            records,
        }
    }
    /// Builds a table whose schema is the key order of the first record.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = records
            .first()
            .map(|r| r.cells.keys().cloned().collect())
            .unwrap_or_default();
        Self::new(columns, records)
    }
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: &[Vec<S>]) -> Self {
        let columns: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let records = rows
            .iter()
            .map(|row| record_from_fields(&columns, row.iter().map(|v| v.as_ref())))
            .collect();
        Self::new(columns, records)
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn records(&self) -> &[Record] {
        &self.records
    }
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
    /// Projects `name` across every row. An unknown column projects as all
    /// missing values.
    pub fn column<'a>(&'a self, name: &'a str) -> Column<'a> {
        Column {
            name,
            values: self.records.iter().map(|r| r.get(name)).collect(),
        }
    }
    /// "`R` rows × `C` columns"
    pub fn dimensions_label(&self) -> String {
        format!(
            "{} rows × {} columns",
            self.row_count(),
            self.column_count()
        )
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    TooFewFields,
    TooManyFields,
    Malformed,
}
/// A non-fatal problem found while reading one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub kind: WarningKind,
    /// Zero-based index of the row as read from the source, header excluded.
    pub row: usize,
    pub message: String,
}
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    pub table: Table,
    pub warnings: Vec<ParseWarning>,
}
/// Parses CSV text with a header row. Header names are trimmed, rows made
/// only of blank fields are skipped, and rows with the wrong field count are
/// kept and reported as warnings.
pub fn parse_csv(text: &str) -> LoadResult<ParsedCsv> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(LoadError::EmptyDataset);
    }
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warnings.push(ParseWarning {
                    kind: WarningKind::Malformed,
                    row: index,
                    message: e.to_string(),
                });
                continue;
            }
        };
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if row.len() != headers.len() {
            let (kind, detail) = if row.len() < headers.len() {
                (WarningKind::TooFewFields, "Too few fields")
            } else {
                (WarningKind::TooManyFields, "Too many fields")
            };
            warnings.push(ParseWarning {
                kind,
                row: index,
                message: format!(
                    "{detail}: expected {} fields but parsed {}",
                    headers.len(),
                    row.len()
                ),
            });
        }
        records.push(record_from_fields(&headers, row.iter()));
    }
    if records.is_empty() {
        return Err(LoadError::EmptyDataset);
    }
    for warning in &warnings {
        warn!(row = warning.row, kind = ?warning.kind, "CSV parsing warning: {}", warning.message);
    }
    let table = Table::new(headers, records);
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        warnings = warnings.len(),
        "Parsed CSV"
    );
    Ok(ParsedCsv { table, warnings })
}
