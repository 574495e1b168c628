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

pub const PRIMARY_BORDER: &str = "rgba(102, 126, 234, 1)";
pub const SERIES_HUES: [u16; 6] = [102, 162, 222, 282, 342, 42];
pub fn primary(alpha: f64) -> String {
    format!("rgba(102, 126, 234, {alpha})")
}
/// Colour for the series at `index`; index 0 belongs to the primary series
/// and the hues repeat past the end of the palette.
pub fn series_color(index: usize, alpha: f64) -> String {
    let hue = SERIES_HUES[index % SERIES_HUES.len()];
    format!("hsla({hue}, 70%, 60%, {alpha})")
}
/// `count` slice colours spaced evenly around the hue circle.
pub fn slice_colors(count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| format!("hsla({}, 70%, 60%, 0.8)", i as f64 * step))
        .collect()
}
