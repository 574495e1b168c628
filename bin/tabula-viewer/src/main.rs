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

mod app;
mod browser;
mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tabula::config::DEFAULT_CONFIG_PATHS;
use tabula::{ChartType, ExportFormat, ViewerConfig};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tabula-viewer", version, about = "View, profile and chart CSV files")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Configuration file; defaults to $TABULA_CONFIG, then config/tabula.yml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
    /// CSV file or URL to open in the viewer
    source: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print per-column statistics
    Profile {
        source: String,
        /// Emit JSON instead of text cards
        #[arg(long)]
        json: bool,
    },
    /// Print a chart configuration, or write it as an HTML page
    Chart {
        source: String,
        #[arg(long = "type", default_value = "line")]
        chart_type: String,
        #[arg(short, long)]
        x: String,
        #[arg(short, long)]
        y: String,
        /// Additional series columns (line, bar and radar only)
        #[arg(long = "series")]
        series: Vec<String>,
        /// Write a Chart.js page here instead of printing JSON
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Convert to CSV or JSON
    Export {
        source: String,
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
        /// Output file; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let explicit = cli.config.clone().or_else(ViewerConfig::path_from_env);
    let (config, config_path) = ViewerConfig::load(explicit.as_deref(), &DEFAULT_CONFIG_PATHS)
        .context("Failed to load viewer configuration")?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level));
    if let Some(path) = &config_path {
        info!(path = %path.display(), "Loaded configuration");
    }
    let runtime = Arc::new(Runtime::new().context("Failed to create Tokio runtime")?);

    match cli.command {
        Some(Command::Profile { source, json }) => cli::profile(&runtime, &config, &source, json),
        Some(Command::Chart {
            source,
            chart_type,
            x,
            y,
            series,
            html,
        }) => {
            let chart_type = ChartType::parse_or_default(&chart_type);
            cli::chart(&runtime, &config, &source, chart_type, x, y, series, html)
        }
        Some(Command::Export {
            source,
            format,
            output,
        }) => cli::export(&runtime, &config, &source, format.into(), output),
        None => app::run(runtime, config, cli.source),
    }
}
