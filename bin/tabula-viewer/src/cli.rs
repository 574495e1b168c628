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

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tabula::source::{load_dropped, load_path};
use tabula::{
    chart_js, ChartRequest, ChartType, ErrorReporter, ExportFormat, LoadOutcome, ProfileCard,
    Session, TabulaError, TableSource, UrlFetcher, ViewerConfig,
};
use tokio::runtime::Runtime;
use tracing::{info, warn};

fn load_source(runtime: &Runtime, config: &ViewerConfig, argument: &str) -> Result<Session> {
    let result = match TableSource::from_argument(argument) {
        TableSource::File(path) => load_path(&path),
        TableSource::Url(url) => {
            let fetcher = UrlFetcher::new(&config.fetch)?;
            runtime.block_on(fetcher.fetch(&url))
        }
        TableSource::Dropped { name, bytes } => load_dropped(&name, &bytes),
    };
    let result = result.map_err(|e| {
        let error = TabulaError::Load(e);
        eprint!("{}", ErrorReporter::new().report(&error));
        anyhow!(error.user_message())
    })?;
    let mut session = Session::with_config(config);
    if session.load(Ok(result)) != LoadOutcome::Applied {
        return Err(anyhow!(session
            .error()
            .unwrap_or("Failed to load table")
            .to_string()));
    }
    if let Some(dataset) = session.dataset() {
        for warning in dataset.warnings() {
            warn!(row = warning.row, "{}", warning.message);
        }
    }
    Ok(session)
}

pub fn profile(runtime: &Runtime, config: &ViewerConfig, source: &str, json: bool) -> Result<()> {
    let session = load_source(runtime, config, source)?;
    let profiles = session.statistics().unwrap_or_default();
    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }
    if let Some(info) = session.file_info() {
        println!("{} ({})\n", info.display_name, info.summary);
    }
    for profile in &profiles {
        let card = ProfileCard::from(profile);
        println!("{}", card.title);
        for (label, value) in &card.items {
            println!("  {label}: {value}");
        }
        println!();
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn chart(
    runtime: &Runtime,
    config: &ViewerConfig,
    source: &str,
    chart_type: ChartType,
    x: String,
    y: String,
    series: Vec<String>,
    html: Option<PathBuf>,
) -> Result<()> {
    let session = load_source(runtime, config, source)?;
    let request = ChartRequest {
        chart_type,
        x_column: x,
        y_column: y,
        extra_series: series,
    };
    let chart = session
        .build_chart(&request)
        .map_err(|e| anyhow!(e.user_message()))?;
    match html {
        Some(path) => {
            let page = chart_js::to_html(&chart)?;
            std::fs::write(&path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote chart page");
        }
        None => println!("{}", serde_json::to_string_pretty(&chart_js::to_chart_js(&chart))?),
    }
    Ok(())
}

pub fn export(
    runtime: &Runtime,
    config: &ViewerConfig,
    source: &str,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let session = load_source(runtime, config, source)?;
    let document = session.export(format)?;
    match output {
        Some(path) => {
            std::fs::write(&path, &document.content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Exported");
        }
        None => println!("{}", document.content),
    }
    Ok(())
}
