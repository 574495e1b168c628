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

use crate::numeric::parse_numeric_or_default;
use crate::palette;
use crate::table::{Record, Table};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Pie,
    Doughnut,
    Scatter,
    Radar,
}
impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Pie,
        ChartType::Doughnut,
        ChartType::Scatter,
        ChartType::Radar,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Scatter => "scatter",
            ChartType::Radar => "radar",
        }
    }
    /// Unknown names fall back to the default grouped line chart.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
    pub fn supports_extra_series(&self) -> bool {
        matches!(self, ChartType::Line | ChartType::Bar | ChartType::Radar)
    }
}
impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for ChartType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown chart type '{s}'"))
    }
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub chart_type: ChartType,
    pub x_column: String,
    pub y_column: String,
    #[serde(default)]
    pub extra_series: Vec<String>,
}
impl ChartRequest {
    pub fn new(chart_type: ChartType, x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self {
            chart_type,
            x_column: x_column.into(),
            y_column: y_column.into(),
            extra_series: Vec::new(),
        }
    }
    pub fn with_series(mut self, column: impl Into<String>) -> Self {
        self.extra_series.push(column.into());
        self
    }
    pub fn has_axes(&self) -> bool {
        !self.x_column.is_empty() && !self.y_column.is_empty()
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Points(Vec<ScatterPoint>),
}
impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(v) => v.len(),
            SeriesData::Points(p) => p.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            SeriesData::Values(v) => Some(v),
            SeriesData::Points(_) => None,
        }
    }
    pub fn points(&self) -> Option<&[ScatterPoint]> {
        match self {
            SeriesData::Points(p) => Some(p),
            SeriesData::Values(_) => None,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Single(String),
    PerPoint(Vec<String>),
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: SeriesData,
    pub border_color: Option<String>,
    pub background_color: Fill,
    pub tension: Option<f64>,
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTitles {
    pub x: Option<String>,
    pub y: Option<String>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
}
/// Declarative chart description handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub title: String,
    /// Category labels; empty for scatter charts.
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub axes: AxisTitles,
    pub show_legend: bool,
    pub legend_position: LegendPosition,
    pub begin_at_zero: bool,
}
fn category_of(record: &Record, x_column: &str) -> String {
    record.text(x_column).to_string()
}
/// Distinct x values in first-occurrence order, each with the rows that
/// carry it. Matching is exact: no trimming and case-sensitive.
pub fn group_by_category<'a>(table: &'a Table, x_column: &str) -> IndexMap<String, Vec<&'a Record>> {
    let mut groups: IndexMap<String, Vec<&Record>> = IndexMap::new();
    for record in table.records() {
        groups
            .entry(category_of(record, x_column))
            .or_default()
            .push(record);
    }
    groups
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
    Sum,
    Mean,
}
fn reduce_groups(
    groups: &IndexMap<String, Vec<&Record>>,
    column: &str,
    reduction: Reduction,
) -> Vec<f64> {
    groups
        .values()
        .map(|rows| {
            let sum: f64 = rows
                .iter()
                .map(|r| parse_numeric_or_default(r.get(column)))
                .sum();
            match reduction {
                Reduction::Sum => sum,
                Reduction::Mean => sum / rows.len() as f64,
            }
        })
        .collect()
}
/// Builds the chart description for `request` over `table`. Cells that do
/// not parse as numbers count as 0; missing columns read as empty.
pub fn aggregate(table: &Table, request: &ChartRequest) -> ChartConfig {
    match request.chart_type {
        ChartType::Pie | ChartType::Doughnut => build_slices(table, request),
        ChartType::Scatter => build_scatter(table, request),
        ChartType::Radar => build_radar(table, request),
        ChartType::Line | ChartType::Bar => build_grouped(table, request),
    }
}
fn build_slices(table: &Table, request: &ChartRequest) -> ChartConfig {
    let (x, y) = (&request.x_column, &request.y_column);
    let labels: Vec<String> = table.records().iter().map(|r| category_of(r, x)).collect();
    let values: Vec<f64> = table
        .records()
        .iter()
        .map(|r| parse_numeric_or_default(r.get(y)))
        .collect();
    let colors = palette::slice_colors(values.len());
    ChartConfig {
        chart_type: request.chart_type,
        title: format!("{y} by {x}"),
        labels,
        datasets: vec![ChartDataset {
            label: y.clone(),
            data: SeriesData::Values(values),
            border_color: None,
            background_color: Fill::PerPoint(colors),
            tension: None,
        }],
        axes: AxisTitles::default(),
        show_legend: true,
        legend_position: LegendPosition::Right,
        begin_at_zero: false,
    }
}
fn build_scatter(table: &Table, request: &ChartRequest) -> ChartConfig {
    let (x, y) = (&request.x_column, &request.y_column);
    let points = table
        .records()
        .iter()
        .map(|r| ScatterPoint {
            x: parse_numeric_or_default(r.get(x)),
            y: parse_numeric_or_default(r.get(y)),
        })
        .collect();
    ChartConfig {
        chart_type: ChartType::Scatter,
        title: format!("{y} vs {x}"),
        labels: Vec::new(),
        datasets: vec![ChartDataset {
            label: format!("{y} vs {x}"),
            data: SeriesData::Points(points),
            border_color: Some(palette::PRIMARY_BORDER.to_string()),
            background_color: Fill::Single(palette::primary(0.6)),
            tension: None,
        }],
        axes: AxisTitles {
            x: Some(x.clone()),
            y: Some(y.clone()),
        },
        show_legend: true,
        legend_position: LegendPosition::Top,
        begin_at_zero: false,
    }
}
fn build_radar(table: &Table, request: &ChartRequest) -> ChartConfig {
    let groups = group_by_category(table, &request.x_column);
    let mut datasets = vec![ChartDataset {
        label: request.y_column.clone(),
        data: SeriesData::Values(reduce_groups(&groups, &request.y_column, Reduction::Mean)),
        border_color: Some(palette::PRIMARY_BORDER.to_string()),
        background_color: Fill::Single(palette::primary(0.2)),
        tension: None,
    }];
    for (idx, series) in request.extra_series.iter().enumerate() {
        datasets.push(ChartDataset {
            label: series.clone(),
            data: SeriesData::Values(reduce_groups(&groups, series, Reduction::Mean)),
            border_color: Some(palette::series_color(idx + 1, 1.0)),
            background_color: Fill::Single(palette::series_color(idx + 1, 0.2)),
            tension: None,
        });
    }
    ChartConfig {
        chart_type: ChartType::Radar,
        title: format!("Radar Chart: {}", request.x_column),
        labels: groups.into_keys().collect(),
        datasets,
        axes: AxisTitles::default(),
        show_legend: true,
        legend_position: LegendPosition::Top,
        begin_at_zero: false,
    }
}
fn build_grouped(table: &Table, request: &ChartRequest) -> ChartConfig {
    let is_bar = request.chart_type == ChartType::Bar;
    let fill_alpha = if is_bar { 0.6 } else { 0.1 };
    let tension = if is_bar { 0.0 } else { 0.4 };
    let groups = group_by_category(table, &request.x_column);
    let mut datasets = vec![ChartDataset {
        label: request.y_column.clone(),
        data: SeriesData::Values(reduce_groups(&groups, &request.y_column, Reduction::Sum)),
        border_color: Some(palette::PRIMARY_BORDER.to_string()),
        background_color: Fill::Single(palette::primary(fill_alpha)),
        tension: Some(tension),
    }];
    for (idx, series) in request.extra_series.iter().enumerate() {
        datasets.push(ChartDataset {
            label: series.clone(),
            data: SeriesData::Values(reduce_groups(&groups, series, Reduction::Sum)),
            border_color: Some(palette::series_color(idx + 1, 1.0)),
            background_color: Fill::Single(palette::series_color(idx + 1, fill_alpha)),
            tension: Some(tension),
        });
    }
    let show_legend = datasets.len() > 1;
    ChartConfig {
        chart_type: request.chart_type,
        title: format!("{} by {}", request.y_column, request.x_column),
        labels: groups.into_keys().collect(),
        datasets,
        axes: AxisTitles {
            x: Some(request.x_column.clone()),
            y: Some("Value".to_string()),
        },
        show_legend,
        legend_position: LegendPosition::Top,
        begin_at_zero: true,
    }
}
