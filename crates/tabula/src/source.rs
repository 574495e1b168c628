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

use crate::config::FetchConfig;
use crate::error::{LoadError, LoadResult};
use crate::table::{parse_csv, ParseWarning, Table};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    File,
    Dropped,
    Url,
}
/// Where a table is loaded from.
#[derive(Debug, Clone)]
pub enum TableSource {
    File(PathBuf),
    Dropped { name: String, bytes: Vec<u8> },
    Url(String),
}
impl TableSource {
    /// `http://` and `https://` arguments are URLs, anything else a path.
    pub fn from_argument(argument: &str) -> Self {
        let trimmed = argument.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            TableSource::Url(trimmed.to_string())
        } else {
            TableSource::File(PathBuf::from(trimmed))
        }
    }
    pub fn kind(&self) -> SourceKind {
        match self {
            TableSource::File(_) => SourceKind::File,
            TableSource::Dropped { .. } => SourceKind::Dropped,
            TableSource::Url(_) => SourceKind::Url,
        }
    }
}
/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// File name for file and drop loads; `None` for URL loads.
    pub file_name: Option<String>,
    pub kind: SourceKind,
    pub table: Table,
    pub warnings: Vec<ParseWarning>,
}
impl LoadedTable {
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("Loaded from URL")
    }
}
/// Rejects names that do not end in `.csv` (case-insensitive).
pub fn ensure_csv_name(name: &str) -> LoadResult<()> {
    if name.to_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(LoadError::NotCsv {
            name: name.to_string(),
        })
    }
}
fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
fn build(file_name: Option<String>, kind: SourceKind, text: &str) -> LoadResult<LoadedTable> {
    let parsed = parse_csv(text)?;
    Ok(LoadedTable {
        file_name,
        kind,
        table: parsed.table,
        warnings: parsed.warnings,
    })
}
pub fn load_path(path: &Path) -> LoadResult<LoadedTable> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    ensure_csv_name(&name)?;
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let loaded = build(Some(name), SourceKind::File, &decode(&bytes))?;
    info!(path = %path.display(), rows = loaded.table.row_count(), "Loaded CSV file");
    Ok(loaded)
}
pub fn load_dropped(name: &str, bytes: &[u8]) -> LoadResult<LoadedTable> {
    ensure_csv_name(name)?;
    let loaded = build(Some(name.to_string()), SourceKind::Dropped, &decode(bytes))?;
    info!(name, rows = loaded.table.row_count(), "Loaded dropped CSV");
    Ok(loaded)
}
/// Validates user input from the URL field.
pub fn parse_url(input: &str) -> LoadResult<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LoadError::EmptyUrl);
    }
    Url::parse(trimmed).map_err(|e| LoadError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })
}
/// Fetches CSV documents over HTTP.
#[derive(Debug, Clone)]
pub struct UrlFetcher {
    client: reqwest::Client,
}
impl UrlFetcher {
    pub fn new(config: &FetchConfig) -> LoadResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
    pub async fn fetch(&self, input: &str) -> LoadResult<LoadedTable> {
        let url = parse_url(input)?;
        debug!(%url, "Fetching CSV");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
            });
        }
        let text = response.text().await?;
        let loaded = build(None, SourceKind::Url, &text)?;
        info!(%url, rows = loaded.table.row_count(), "Loaded CSV from URL");
        Ok(loaded)
    }
}
