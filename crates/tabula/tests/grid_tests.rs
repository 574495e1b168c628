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

use tabula::export::{export_file_name, normalize_file_name, to_csv, to_json, to_print_html};
use tabula::{ExportFormat, Grid, SearchResults, SortOrder, Table};

fn people() -> Grid {
    Grid::from_table(&Table::from_rows(
        &["name", "age"],
        &[vec!["Bob", "9"], vec!["alice", "10"], vec!["Carol", ""]],
    ))
}

#[test]
fn test_edits_do_not_touch_table() {
    let table = Table::from_rows(&["a"], &[vec!["1"]]);
    let mut grid = Grid::from_table(&table);
    assert!(grid.set_cell(0, 0, "2"));
    assert!(!grid.set_cell(5, 0, "x"));
    assert_eq!(grid.cell(0, 0), Some("2"));
    assert_eq!(table.records()[0].get("a"), Some("1"));
    assert_eq!(grid.to_table().records()[0].get("a"), Some("2"));
}

#[test]
fn test_sort_is_numeric_aware_with_empty_last() {
    let mut grid = people();
    grid.sort_by(1, SortOrder::Ascending);
    let ages: Vec<&str> = grid.rows().iter().map(|r| r[1].as_str()).collect();
    assert_eq!(ages, vec!["9", "10", ""]);
    grid.toggle_sort(1);
    let ages: Vec<&str> = grid.rows().iter().map(|r| r[1].as_str()).collect();
    assert_eq!(ages, vec!["10", "9", ""]);
    assert_eq!(grid.sort_state().map(|s| s.order), Some(SortOrder::Descending));
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let grid = people();
    let results = SearchResults::run(&grid, "  AL ");
    assert_eq!(results.query(), "al");
    assert!(results.contains(1, 0));
    assert!(!results.contains(0, 0));
    assert_eq!(results.len(), 1);
    let results = SearchResults::run(&grid, "1");
    assert_eq!(results.matching_rows().into_iter().collect::<Vec<_>>(), vec![1]);
    let empty = SearchResults::run(&grid, "   ");
    assert!(!empty.is_active());
    assert!(empty.is_empty());
}

#[test]
fn test_csv_export_uses_crlf_without_trailing_break() {
    let grid = Grid::from_table(&Table::from_rows(
        &["name", "note"],
        &[vec!["a", "x,y"], vec!["b", "plain"]],
    ));
    assert_eq!(to_csv(&grid).unwrap(), "name,note\r\na,\"x,y\"\r\nb,plain");
}

#[test]
fn test_json_export_keeps_header_order() {
    let grid = Grid::from_table(&Table::from_rows(&["z", "a"], &[vec!["1", "2"]]));
    let json = to_json(&grid).unwrap();
    assert!(json.find("\"z\"").unwrap() < json.find("\"a\"").unwrap());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["z"], "1");
    assert_eq!(value[0]["a"], "2");
}

#[test]
fn test_export_file_names() {
    assert_eq!(export_file_name(Some("sales.csv"), ExportFormat::Csv), "sales_export.csv");
    assert_eq!(export_file_name(Some("sales.csv"), ExportFormat::Json), "sales_export.json");
    assert_eq!(export_file_name(None, ExportFormat::Json), "export_export.json");
}

#[test]
fn test_rename_normalisation() {
    assert_eq!(normalize_file_name("  report ", "old.csv"), "report.csv");
    assert_eq!(normalize_file_name("data.csv", "old.csv"), "data.csv");
    assert_eq!(normalize_file_name("   ", "old.csv"), "old.csv");
}

#[test]
fn test_print_document_escapes_cells() {
    let grid = Grid::from_table(&Table::from_rows(&["<h>"], &[vec!["a & b"]]));
    let html = to_print_html(&grid, "Q&A.csv");
    assert!(html.contains("<th>&lt;h&gt;</th>"));
    assert!(html.contains("<td>a &amp; b</td>"));
    assert!(html.contains("<h2>Q&amp;A.csv</h2>"));
    assert!(html.contains("window.print()"));
}
