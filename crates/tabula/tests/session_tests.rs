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

use tabula::source::{load_dropped, SourceKind};
use tabula::{
    ChartRequest, ChartType, ExportFormat, LoadError, LoadOutcome, LoadedTable, Session,
    TabulaError, Table,
};

fn loaded(name: Option<&str>, csv: &str) -> LoadedTable {
    let parsed = tabula::parse_csv(csv).unwrap();
    LoadedTable {
        file_name: name.map(str::to_string),
        kind: if name.is_some() { SourceKind::File } else { SourceKind::Url },
        table: parsed.table,
        warnings: parsed.warnings,
    }
}

fn session_with(csv: &str) -> Session {
    let mut session = Session::new();
    assert_eq!(session.load(Ok(loaded(Some("sales.csv"), csv))), LoadOutcome::Applied);
    session
}

#[test]
fn test_stale_url_response_is_discarded() {
    let mut session = Session::new();
    let first = session.begin_load();
    let second = session.begin_load();
    assert!(!session.is_current(first));
    let outcome = session.finish_load(second, Ok(loaded(None, "a\n2\n")));
    assert_eq!(outcome, LoadOutcome::Applied);
    let outcome = session.finish_load(first, Ok(loaded(Some("old.csv"), "a\n1\n")));
    assert_eq!(outcome, LoadOutcome::Stale);
    let dataset = session.dataset().unwrap();
    assert_eq!(dataset.display_name(), "Loaded from URL");
    assert_eq!(dataset.generation(), second.generation());
}

#[test]
fn test_stale_failure_does_not_report() {
    let mut session = Session::new();
    let first = session.begin_load();
    let _second = session.begin_load();
    let outcome = session.finish_load(first, Err(LoadError::HttpStatus { status: 500 }));
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(session.error(), None);
}

#[test]
fn test_failed_load_keeps_previous_dataset() {
    let mut session = session_with("a,b\n1,2\n");
    let outcome = session.load(load_dropped("notes.txt", b"a\n1\n"));
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(session.error(), Some("Please select a valid CSV file."));
    assert_eq!(session.table().map(Table::row_count), Some(1));
    session.clear_error();
    assert_eq!(session.error(), None);
}

#[test]
fn test_new_load_replaces_everything() {
    let mut session = session_with("a,b\n1,2\n");
    session.grid_mut().unwrap().set_cell(0, 0, "edited");
    session.search("edit");
    assert_eq!(session.search_results().len(), 1);
    session.load(Ok(loaded(Some("next.csv"), "x\n9\n8\n")));
    assert_eq!(session.grid().unwrap().headers(), ["x"]);
    assert!(!session.search_results().is_active());
    assert_eq!(session.file_info().unwrap().summary, "2 rows × 1 columns");
}

#[test]
fn test_statistics_ignore_grid_edits() {
    let mut session = session_with("n\n1\n2\n3\n");
    session.grid_mut().unwrap().set_cell(0, 0, "abc");
    let stats = session.statistics().unwrap();
    assert!(stats[0].is_numeric);
    assert_eq!(stats[0].min(), Some(1.0));
}

#[test]
fn test_rename_updates_display_and_export_names() {
    let mut session = session_with("a\n1\n");
    assert_eq!(session.rename("quarterly").as_deref(), Some("quarterly.csv"));
    assert_eq!(session.file_info().unwrap().display_name, "quarterly.csv");
    assert_eq!(session.rename("  ").as_deref(), Some("quarterly.csv"));
    let doc = session.export(ExportFormat::Csv).unwrap();
    assert_eq!(doc.file_name, "quarterly_export.csv");
    assert_eq!(doc.mime_type, "text/csv;charset=utf-8");
}

#[test]
fn test_url_exports_use_generic_name() {
    let mut session = Session::new();
    session.load(Ok(loaded(None, "a\n1\n")));
    let doc = session.export(ExportFormat::Json).unwrap();
    assert_eq!(doc.file_name, "export_export.json");
}

#[test]
fn test_exports_include_edits() {
    let mut session = session_with("a,b\n1,2\n");
    session.grid_mut().unwrap().set_cell(0, 1, "changed");
    assert_eq!(session.clipboard_text().unwrap(), "a,b\r\n1,changed");
    assert!(session.print_document().unwrap().contains("<h2>sales.csv</h2>"));
}

#[test]
fn test_print_title_falls_back_for_url_loads() {
    let mut session = Session::new();
    session.load(Ok(loaded(None, "a\n1\n")));
    assert!(session.print_document().unwrap().contains("<h2>CSV Data</h2>"));
}

#[test]
fn test_surfaces_require_data() {
    let session = Session::new();
    let err = session.export(ExportFormat::Csv).unwrap_err();
    assert!(matches!(err, TabulaError::Export(_)));
    let err = session.build_chart(&ChartRequest::new(ChartType::Bar, "a", "b")).unwrap_err();
    assert_eq!(err.user_message(), "Please load a CSV file first.");
    assert!(session.statistics().is_none());
}

#[test]
fn test_build_chart_requires_both_axes() {
    let session = session_with("a,b\n1,2\n");
    let err = session.build_chart(&ChartRequest::new(ChartType::Bar, "a", "")).unwrap_err();
    assert_eq!(err.user_message(), "Please select both X-axis and Y-axis columns.");
}

#[test]
fn test_build_chart_filters_series() {
    let session = session_with("k,a,b\nx,1,2\n");
    let request = ChartRequest::new(ChartType::Line, "k", "a")
        .with_series("")
        .with_series("b");
    assert_eq!(session.build_chart(&request).unwrap().datasets.len(), 2);
    let request = ChartRequest::new(ChartType::Pie, "k", "a").with_series("b");
    assert_eq!(session.build_chart(&request).unwrap().datasets.len(), 1);
}

#[test]
fn test_series_candidates_exclude_chosen() {
    let session = session_with("k,a,b,c\nx,1,2,3\n");
    let candidates = session.series_candidates("a", &["b".to_string()]);
    assert_eq!(candidates, vec!["k".to_string(), "c".to_string()]);
    assert_eq!(session.numeric_columns(), ["a", "b", "c"]);
}

#[test]
fn test_numeric_columns_follow_loaded_table() {
    let mut session = Session::new();
    assert!(session.numeric_columns().is_empty());
    session.load(Ok(loaded(Some("m.csv"), "k,n
x,1
y,2
")));
    session.grid_mut().unwrap().set_cell(0, 1, "text");
    session.grid_mut().unwrap().set_cell(1, 1, "more");
    assert_eq!(session.numeric_columns(), ["n"]);
    session.load(Ok(loaded(Some("w.csv"), "k,n
x,a
y,b
")));
    assert!(session.numeric_columns().is_empty());
}
