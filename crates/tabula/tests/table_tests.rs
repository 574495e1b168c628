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

use tabula::table::WarningKind;
use tabula::{parse_csv, LoadError, Record, Table};

#[test]
fn test_parse_trims_headers_and_keeps_order() {
    let parsed = parse_csv(" name , age ,city\nAda,36,London\nAlan,41,Wilmslow\n").unwrap();
    assert_eq!(parsed.table.columns(), ["name", "age", "city"]);
    assert_eq!(parsed.table.row_count(), 2);
    assert_eq!(parsed.table.records()[1].get("city"), Some("Wilmslow"));
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_parse_skips_blank_rows() {
    let parsed = parse_csv("a,b\n1,2\n\n , \n3,4\n").unwrap();
    assert_eq!(parsed.table.row_count(), 2);
}

#[test]
fn test_parse_strips_byte_order_mark() {
    let parsed = parse_csv("\u{feff}id,v\n1,2\n").unwrap();
    assert_eq!(parsed.table.columns(), ["id", "v"]);
}

#[test]
fn test_parse_reports_ragged_rows() {
    let parsed = parse_csv("a,b,c\n1,2\n1,2,3,4\n5,6,7\n").unwrap();
    assert_eq!(parsed.table.row_count(), 3);
    let kinds: Vec<WarningKind> = parsed.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::TooFewFields, WarningKind::TooManyFields]);
    assert_eq!(parsed.warnings[0].row, 0);
    assert_eq!(parsed.warnings[1].row, 1);
    let short = &parsed.table.records()[0];
    assert_eq!(short.get("c"), None);
    assert_eq!(short.text("c"), "");
}

#[test]
fn test_parse_quoted_fields() {
    let parsed = parse_csv("name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n").unwrap();
    let record = &parsed.table.records()[0];
    assert_eq!(record.get("name"), Some("Smith, J"));
    assert_eq!(record.get("note"), Some("said \"hi\""));
}

#[test]
fn test_parse_empty_input_is_rejected() {
    assert!(matches!(parse_csv(""), Err(LoadError::EmptyDataset)));
    assert!(matches!(parse_csv("a,b\n"), Err(LoadError::EmptyDataset)));
    assert!(matches!(parse_csv("a,b\n,\n"), Err(LoadError::EmptyDataset)));
}

#[test]
fn test_duplicate_headers_keep_first() {
    let table = Table::new(
        vec!["x".to_string(), "y".to_string(), "x".to_string()],
        Vec::new(),
    );
    assert_eq!(table.columns(), ["x", "y"]);
}

#[test]
fn test_column_projection_and_dimensions() {
    let table = Table::from_records(vec![
        Record::new().with_cell("a", "1").with_cell("b", "2"),
        Record::new().with_cell("a", "3"),
    ]);
    assert_eq!(table.columns(), ["a", "b"]);
    let column = table.column("b");
    assert_eq!(column.values, vec![Some("2"), None]);
    assert_eq!(table.column("zzz").len(), 2);
    assert!(table.has_column("a"));
    assert_eq!(table.dimensions_label(), "2 rows × 2 columns");
}

#[test]
fn test_duplicate_header_keeps_first_column_values() {
    let parsed = parse_csv("a,a,b\n1,2,3\n").unwrap();
    assert_eq!(parsed.table.columns(), ["a", "b"]);
    let record = &parsed.table.records()[0];
    assert_eq!(record.get("a"), Some("1"));
    assert_eq!(record.get("b"), Some("3"));
    let grid = tabula::Grid::from_table(&parsed.table);
    assert_eq!(grid.rows()[0], ["1", "3"]);
}

#[test]
fn test_from_rows_duplicate_header_keeps_first() {
    let table = Table::from_rows(&["x", "x"], &[vec!["first", "second"]]);
    assert_eq!(table.columns(), ["x"]);
    assert_eq!(table.records()[0].get("x"), Some("first"));
}
