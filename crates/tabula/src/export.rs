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

use crate::error::{ExportError, ExportResult};
use crate::grid::Grid;
use handlebars::html_escape;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}
impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}
/// Serialises the grid as CSV: header line first, CRLF between records, no
/// trailing line break.
pub fn to_csv(grid: &Grid) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(grid.headers())?;
    for row in grid.rows() {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}
/// Serialises the grid as a pretty-printed JSON array of row objects whose
/// keys follow header order.
pub fn to_json(grid: &Grid) -> ExportResult<String> {
    let rows: Vec<IndexMap<&str, &str>> = grid
        .rows()
        .iter()
        .map(|row| {
            grid.headers()
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.as_str(), v.as_str()))
                .collect()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
pub fn export(grid: &Grid, format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Csv => to_csv(grid),
        ExportFormat::Json => to_json(grid),
    }
}
/// Download name for an export: the source name without its `.csv`, with an
/// `_export` suffix. Tables without a file name export as `export`.
pub fn export_file_name(source_name: Option<&str>, format: ExportFormat) -> String {
    let stem = source_name
        .map(|name| name.replacen(".csv", "", 1))
        .unwrap_or_else(|| "export".to_string());
    format!("{stem}_export.{}", format.extension())
}
/// Applies a user rename: trimmed, `.csv` appended when missing. Blank input
/// keeps `current`.
pub fn normalize_file_name(input: &str, current: &str) -> String {
    let name = input.trim();
    if name.is_empty() {
        return current.to_string();
    }
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}
const PRINT_STYLE: &str = r#"
      body { font-family: Arial, sans-serif; margin: 20px; }
      table { border-collapse: collapse; width: 100%; }
      th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
      th { background-color: #f2f2f2; font-weight: bold; }
      @media print {
        body { margin: 0; }
        table { page-break-inside: auto; }
        tr { page-break-inside: avoid; page-break-after: auto; }
      }"#;
/// Printable HTML document for the grid. The page opens the print dialog
/// once loaded.
pub fn to_print_html(grid: &Grid, title: &str) -> String {
    let header_cells: String = grid
        .headers()
        .iter()
        .map(|h| format!("<th>{}</th>", html_escape(h)))
        .collect();
    let body_rows: String = grid
        .rows()
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", html_escape(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>CSV Viewer - Print</title>
    <style>{PRINT_STYLE}
    </style>
  </head>
  <body onload="window.print()">
    <h2>{title}</h2>
    <table>
      <thead>
        <tr>{header_cells}</tr>
      </thead>
      <tbody>
{body_rows}
      </tbody>
    </table>
  </body>
</html>
"#
    )
}
