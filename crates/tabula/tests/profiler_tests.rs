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

use proptest::prelude::*;
use tabula::numeric::median;
use tabula::profiler::{is_numeric_dominant, numeric_columns};
use tabula::{profile, profile_all, ProfileCard, Record, Table};

fn single_column(values: &[&str]) -> Table {
    let rows: Vec<Vec<&str>> = values.iter().map(|v| vec![*v]).collect();
    Table::from_rows(&["value"], &rows)
}

#[test]
fn test_numeric_column_summary() {
    let table = single_column(&["4", "1", "3", "2"]);
    let profile = profile(&table, "value");
    assert!(profile.is_numeric);
    assert_eq!(profile.total_non_empty, 4);
    assert_eq!(profile.total_empty, 0);
    assert_eq!(profile.min(), Some(1.0));
    assert_eq!(profile.max(), Some(4.0));
    assert_eq!(profile.mean(), Some(2.5));
    assert_eq!(profile.median(), Some(2.5));
    assert_eq!(profile.distinct_count, None);
}

#[test]
fn test_median_even_and_odd() {
    assert_eq!(median(&mut [1.0, 2.0, 3.0, 4.0]), Some(2.5));
    assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&mut []), None);
    let odd = profile(&single_column(&["3", "1", "2"]), "value");
    assert_eq!(odd.median(), Some(2.0));
}

#[test]
fn test_exactly_half_numeric_is_not_numeric() {
    let table = single_column(&["1", "2", "x", "y"]);
    let profile = profile(&table, "value");
    assert!(!profile.is_numeric);
    assert_eq!(profile.numeric, None);
    assert_eq!(profile.distinct_count, Some(4));
    assert!(!is_numeric_dominant(2, 4));
    assert!(is_numeric_dominant(3, 5));
}

#[test]
fn test_not_available_counts_as_non_empty_but_not_numeric() {
    let table = single_column(&["10", "N/A", "20", "30"]);
    let profile = profile(&table, "value");
    assert_eq!(profile.total_non_empty, 4);
    assert_eq!(profile.numeric_count, 3);
    assert!(profile.is_numeric);
    assert_eq!(profile.mean(), Some(20.0));
}

#[test]
fn test_whitespace_only_cells_are_empty() {
    let table = single_column(&["  ", "", "a", "a", "b"]);
    let profile = profile(&table, "value");
    assert_eq!(profile.total_empty, 2);
    assert_eq!(profile.total_non_empty, 3);
    assert_eq!(profile.distinct_count, Some(2));
}

#[test]
fn test_distinct_count_is_case_and_space_sensitive() {
    let table = single_column(&["Apple", "apple", "apple ", "Apple"]);
    assert_eq!(profile(&table, "value").distinct_count, Some(3));
}

#[test]
fn test_missing_column_is_entirely_empty() {
    let table = single_column(&["1", "2", "3"]);
    let profile = profile(&table, "nope");
    assert_eq!(profile.total_non_empty, 0);
    assert_eq!(profile.total_empty, 3);
    assert!(!profile.is_numeric);
    assert_eq!(profile.distinct_count, Some(0));
}

#[test]
fn test_cells_missing_from_records_count_as_empty() {
    let table = Table::new(
        vec!["a".to_string(), "b".to_string()],
        vec![
            Record::new().with_cell("a", "1").with_cell("b", "2"),
            Record::new().with_cell("a", "3"),
        ],
    );
    let profile = profile(&table, "b");
    assert_eq!(profile.total_non_empty, 1);
    assert_eq!(profile.total_empty, 1);
}

#[test]
fn test_lenient_numeric_prefix() {
    let table = single_column(&["12kg", " 3.5", "-1e2", "abc"]);
    let profile = profile(&table, "value");
    assert_eq!(profile.numeric_count, 3);
    assert_eq!(profile.min(), Some(-100.0));
    assert_eq!(profile.max(), Some(12.0));
}

#[test]
fn test_profile_all_keeps_schema_order() {
    let table = Table::from_rows(
        &["name", "score", "city"],
        &[vec!["a", "1", "x"], vec!["b", "2", "y"], vec!["c", "3", "x"]],
    );
    let names: Vec<String> = profile_all(&table).into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["name", "score", "city"]);
    assert_eq!(numeric_columns(&table), vec!["score".to_string()]);
}

#[test]
fn test_profile_card_numeric_lines() {
    let table = single_column(&["1", "2", "4"]);
    let card = ProfileCard::from(&profile(&table, "value"));
    assert_eq!(card.title, "value");
    let labels: Vec<&str> = card.items.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["Total", "Empty", "Numeric", "Min", "Max", "Avg", "Median"]);
    assert_eq!(card.items[5].1, "2.33");
    assert_eq!(card.items[6].1, "2.00");
}

#[test]
fn test_profile_card_text_lines() {
    let table = single_column(&["a", "b", ""]);
    let card = ProfileCard::from(&profile(&table, "value"));
    assert_eq!(
        card.items,
        vec![
            ("Total".to_string(), "2".to_string()),
            ("Empty".to_string(), "1".to_string()),
            ("Unique".to_string(), "2".to_string()),
        ]
    );
}

proptest! {
    #[test]
    fn test_non_empty_plus_empty_is_row_count(
        cells in prop::collection::vec(prop_oneof!["", " ", "[0-9]{1,3}", "[a-z]{1,4}", "N/A"], 0..40)
    ) {
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let table = single_column(&refs);
        let profile = profile(&table, "value");
        prop_assert_eq!(profile.total_non_empty + profile.total_empty, table.row_count());
    }

    #[test]
    fn test_profile_is_idempotent(
        cells in prop::collection::vec("[0-9a-c ]{0,3}", 0..30)
    ) {
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let table = single_column(&refs);
        prop_assert_eq!(profile(&table, "value"), profile(&table, "value"));
    }
}
