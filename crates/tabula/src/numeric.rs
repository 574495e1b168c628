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

//! Lenient decimal parsing for spreadsheet cells.
//!
//! Cells are parsed the way a browser's `parseFloat` reads them: leading
//! whitespace is skipped and the longest decimal prefix is taken, so `"12kg"`
//! reads as `12`. Values that do not start with a number, or that overflow to
//! an infinite value, do not parse.

use once_cell::sync::Lazy;
use regex::Regex;

static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("decimal prefix pattern is valid")
});

/// Parses the leading decimal number of `value`, returning `None` when there
/// is none or it is not finite.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let candidate = value.trim_start();
    let matched = DECIMAL_PREFIX.find(candidate)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Numeric value of a cell for aggregation; anything unparseable counts as 0.
pub fn parse_numeric_or_default(value: Option<&str>) -> f64 {
    value.and_then(parse_numeric).unwrap_or(0.0)
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format2(value: f64) -> String {
    format!("{value:.2}")
}

/// Median of `values`; sorts the slice in place.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
