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

use crate::numeric::parse_numeric;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}
impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: usize,
    pub order: SortOrder,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}
/// Editable view of a loaded table. Edits and sorting change only the grid;
/// the table it was built from stays untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    sort: Option<SortState>,
}
impl Grid {
    pub fn from_table(table: &Table) -> Self {
        let headers = table.columns().to_vec();
        let rows = table
            .records()
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|h| record.text(h).to_string())
                    .collect()
            })
            .collect();
        Self {
            headers,
            rows,
            sort: None,
        }
    }
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut String> {
        self.rows.get_mut(row)?.get_mut(column)
    }
    /// Replaces one cell. Returns `false` when the position is out of range.
    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<String>) -> bool {
        match self.cell_mut(row, column) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }
    /// Stable sort on one column. Two numeric cells compare as numbers,
    /// otherwise cells compare as text; empty cells always sort last.
    pub fn sort_by(&mut self, column: usize, order: SortOrder) {
        if column >= self.headers.len() {
            return;
        }
        self.rows.sort_by(|a, b| {
            let left = a.get(column).map(String::as_str).unwrap_or("");
            let right = b.get(column).map(String::as_str).unwrap_or("");
            compare_cells(left, right, order)
        });
        self.sort = Some(SortState { column, order });
    }
    /// Sorts on `column`, flipping direction when it is already the sort key.
    pub fn toggle_sort(&mut self, column: usize) {
        let order = match self.sort {
            Some(state) if state.column == column => state.order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.sort_by(column, order);
    }
    /// Rows as owned records keyed by header, for export.
    pub fn to_table(&self) -> Table {
        Table::from_rows(&self.headers, &self.rows)
    }
}
fn compare_cells(left: &str, right: &str, order: SortOrder) -> Ordering {
    match (left.trim().is_empty(), right.trim().is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let ordering = match (parse_numeric(left), parse_numeric(right)) {
        (Some(l), Some(r)) => l.total_cmp(&r),
        _ => left.cmp(right),
    };
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}
