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

//! Chart.js rendering of [`ChartConfig`]. The library never draws; it emits
//! the configuration object and a standalone page that loads Chart.js.

use crate::aggregator::{ChartConfig, ChartType, Fill, LegendPosition, SeriesData};
use crate::error::ExportResult;
use handlebars::html_escape;
use serde_json::{json, Map, Value};

pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

fn dataset_value(dataset: &crate::aggregator::ChartDataset) -> Value {
    let mut obj = Map::new();
    obj.insert("label".into(), json!(dataset.label));
    let data = match &dataset.data {
        SeriesData::Values(values) => json!(values),
        SeriesData::Points(points) => json!(points),
    };
    obj.insert("data".into(), data);
    if let Some(border) = &dataset.border_color {
        obj.insert("borderColor".into(), json!(border));
    }
    let background = match &dataset.background_color {
        Fill::Single(colour) => json!(colour),
        Fill::PerPoint(colours) => json!(colours),
    };
    obj.insert("backgroundColor".into(), background);
    if let Some(tension) = dataset.tension {
        obj.insert("tension".into(), json!(tension));
    }
    Value::Object(obj)
}
fn axis_title(text: &str) -> Value {
    json!({ "title": { "display": true, "text": text } })
}
/// The `new Chart(ctx, config)` configuration object for `chart`.
pub fn to_chart_js(chart: &ChartConfig) -> Value {
    let datasets: Vec<Value> = chart.datasets.iter().map(dataset_value).collect();
    let mut data = Map::new();
    if chart.chart_type != ChartType::Scatter {
        data.insert("labels".into(), json!(chart.labels));
    }
    data.insert("datasets".into(), Value::Array(datasets));
    let mut scales = Map::new();
    if let Some(x) = &chart.axes.x {
        scales.insert("x".into(), axis_title(x));
    }
    if let Some(y) = &chart.axes.y {
        let mut axis = axis_title(y);
        if chart.begin_at_zero {
            axis["beginAtZero"] = json!(true);
        }
        scales.insert("y".into(), axis);
    }
    let position = match chart.legend_position {
        LegendPosition::Top => "top",
        LegendPosition::Right => "right",
    };
    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": true,
        "plugins": {
            "title": { "display": true, "text": chart.title },
            "legend": { "display": chart.show_legend, "position": position }
        }
    });
    if !scales.is_empty() {
        options["scales"] = Value::Object(scales);
    }
    json!({
        "type": chart.chart_type.as_str(),
        "data": Value::Object(data),
        "options": options,
    })
}
/// Standalone HTML page drawing `chart` with Chart.js.
pub fn to_html(chart: &ChartConfig) -> ExportResult<String> {
    let config = serde_json::to_string(&to_chart_js(chart))?.replace("</", "<\\/");
    let title = html_escape(&chart.title);
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{CHART_JS_CDN}"></script>
    <style>body {{ font-family: Arial, sans-serif; margin: 20px; }} #chart {{ max-width: 960px; }}</style>
  </head>
  <body>
    <canvas id="chart"></canvas>
    <script>
      new Chart(document.getElementById('chart').getContext('2d'), {config});
    </script>
  </body>
</html>
"#
    ))
}
