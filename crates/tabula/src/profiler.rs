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

use crate::numeric::{format2, median, parse_numeric, round2};
use crate::table::Table;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}
impl NumericSummary {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let mut sorted = values.to_vec();
        let median = median(&mut sorted)?;
        Some(Self {
            min,
            max,
            mean,
            median,
        })
    }
    /// Copy with every field rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            min: round2(self.min),
            max: round2(self.max),
            mean: round2(self.mean),
            median: round2(self.median),
        }
    }
}
/// Descriptive statistics for one column of a table snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub total_non_empty: usize,
    pub total_empty: usize,
    /// Non-empty values that parsed as finite numbers.
    pub numeric_count: usize,
    pub is_numeric: bool,
    /// Present only for numeric columns.
    pub numeric: Option<NumericSummary>,
    /// Present only for non-numeric columns.
    pub distinct_count: Option<usize>,
}
impl ColumnProfile {
    pub fn min(&self) -> Option<f64> {
        self.numeric.map(|n| n.min)
    }
    pub fn max(&self) -> Option<f64> {
        self.numeric.map(|n| n.max)
    }
    pub fn mean(&self) -> Option<f64> {
        self.numeric.map(|n| n.mean)
    }
    pub fn median(&self) -> Option<f64> {
        self.numeric.map(|n| n.median)
    }
}
/// A column is numeric when strictly more than half of its non-empty values
/// parse as numbers.
pub fn is_numeric_dominant(numeric_count: usize, non_empty_count: usize) -> bool {
    numeric_count * 2 > non_empty_count
}
/// Profiles `column_name` in `table`. A column missing from the schema is
/// profiled as entirely empty.
pub fn profile(table: &Table, column_name: &str) -> ColumnProfile {
    let column = table.column(column_name);
    let non_empty: Vec<&str> = column
        .values
        .iter()
        .flatten()
        .copied()
        .filter(|v| !v.trim().is_empty())
        .collect();
    let numeric_values: Vec<f64> = non_empty.iter().filter_map(|v| parse_numeric(v)).collect();
    let is_numeric = is_numeric_dominant(numeric_values.len(), non_empty.len());
    let (numeric, distinct_count) = if is_numeric {
        (NumericSummary::from_values(&numeric_values), None)
    } else {
        let distinct: HashSet<&str> = non_empty.iter().copied().collect();
        (None, Some(distinct.len()))
    };
    ColumnProfile {
        name: column_name.to_string(),
        total_non_empty: non_empty.len(),
        total_empty: table.row_count() - non_empty.len(),
        numeric_count: numeric_values.len(),
        is_numeric,
        numeric,
        distinct_count,
    }
}
/// Profiles every column of the schema, in schema order.
pub fn profile_all(table: &Table) -> Vec<ColumnProfile> {
    table
        .columns()
        .par_iter()
        .map(|name| profile(table, name))
        .collect()
}
/// Columns classified as numeric by [`profile`], in schema order.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    profile_all(table)
        .into_iter()
        .filter(|p| p.is_numeric)
        .map(|p| p.name)
        .collect()
}
/// Display-ready rendering of a profile: a title plus labelled lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub title: String,
    pub items: Vec<(String, String)>,
}
impl From<&ColumnProfile> for ProfileCard {
    fn from(profile: &ColumnProfile) -> Self {
        let mut items = vec![
            ("Total".to_string(), profile.total_non_empty.to_string()),
            ("Empty".to_string(), profile.total_empty.to_string()),
        ];
        if let Some(stats) = profile.numeric {
            items.push(("Numeric".to_string(), profile.numeric_count.to_string()));
            items.push(("Min".to_string(), format2(stats.min)));
            items.push(("Max".to_string(), format2(stats.max)));
            items.push(("Avg".to_string(), format2(stats.mean)));
            items.push(("Median".to_string(), format2(stats.median)));
        } else {
            items.push((
                "Unique".to_string(),
                profile.distinct_count.unwrap_or_default().to_string(),
            ));
        }
        Self {
            title: profile.name.clone(),
            items,
        }
    }
}
