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

use crate::grid::{CellRef, Grid};
use std::collections::BTreeSet;
/// A grid search. The query is trimmed and matched case-insensitively as a
/// substring of each cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    query: String,
    matches: BTreeSet<CellRef>,
}
impl SearchResults {
    pub fn run(grid: &Grid, raw_query: &str) -> Self {
        let query = raw_query.trim().to_lowercase();
        if query.is_empty() {
            return Self::default();
        }
        let matches = grid
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                let query = &query;
                cells.iter().enumerate().filter_map(move |(column, cell)| {
                    cell.to_lowercase()
                        .contains(query.as_str())
                        .then_some(CellRef { row, column })
                })
            })
            .collect();
        Self { query, matches }
    }
    pub fn query(&self) -> &str {
        &self.query
    }
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
    pub fn len(&self) -> usize {
        self.matches.len()
    }
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.matches.contains(&CellRef { row, column })
    }
    /// Matches in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellRef> {
        self.matches.iter()
    }
    /// Rows holding at least one match.
    pub fn matching_rows(&self) -> BTreeSet<usize> {
        self.matches.iter().map(|c| c.row).collect()
    }
}
