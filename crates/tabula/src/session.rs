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

//! Application state owned by the front end. Every load replaces the whole
//! dataset; profiles and charts are computed from it on demand.

use crate::aggregator::{aggregate, ChartConfig, ChartRequest};
use crate::config::ViewerConfig;
use crate::error::{ChartError, ExportError, LoadResult, Result, TabulaError};
use crate::export::{self, normalize_file_name, ExportFormat};
use crate::grid::Grid;
use crate::profiler::{self, ColumnProfile};
use crate::search::SearchResults;
use crate::source::{LoadedTable, SourceKind};
use crate::table::{ParseWarning, Table};
use tracing::{debug, info, warn};

/// Identifies one load request. Only the newest ticket may install a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);
impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started before this one finished; its result was
    /// dropped.
    Stale,
    Failed,
}
/// The loaded table together with its editable grid.
#[derive(Debug, Clone)]
pub struct Dataset {
    display_name: String,
    file_name: Option<String>,
    kind: SourceKind,
    table: Table,
    grid: Grid,
    warnings: Vec<ParseWarning>,
    /// Classified once per load; the table never changes afterwards.
    numeric_columns: Vec<String>,
    generation: u64,
}
impl Dataset {
    fn new(loaded: LoadedTable, generation: u64) -> Self {
        let grid = Grid::from_table(&loaded.table);
        let numeric_columns = profiler::numeric_columns(&loaded.table);
        Self {
            display_name: loaded.display_name().to_string(),
            file_name: loaded.file_name,
            kind: loaded.kind,
            table: loaded.table,
            grid,
            warnings: loaded.warnings,
            numeric_columns,
            generation,
        }
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
    pub fn kind(&self) -> SourceKind {
        self.kind
    }
    /// The table as loaded, before any grid edits.
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub display_name: String,
    pub summary: String,
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}
#[derive(Debug)]
pub struct Session {
    dataset: Option<Dataset>,
    latest_ticket: u64,
    error: Option<String>,
    search: SearchResults,
    print_fallback_title: String,
}
impl Session {
    pub fn new() -> Self {
        Self::with_config(&ViewerConfig::default())
    }
    pub fn with_config(config: &ViewerConfig) -> Self {
        Self {
            dataset: None,
            latest_ticket: 0,
            error: None,
            search: SearchResults::default(),
            print_fallback_title: config.print.fallback_title.clone(),
        }
    }
    /// Starts a load. Any load started earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.error = None;
        LoadTicket(self.latest_ticket)
    }
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_ticket
    }
    /// Installs the result of the load identified by `ticket`. Results of
    /// superseded loads are discarded, errors included. A failed load keeps
    /// the previous dataset and records the error message.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: LoadResult<LoadedTable>) -> LoadOutcome {
        if !self.is_current(ticket) {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale load result"
            );
            return LoadOutcome::Stale;
        }
        match result {
            Ok(loaded) => {
                info!(
                    name = loaded.display_name(),
                    rows = loaded.table.row_count(),
                    columns = loaded.table.column_count(),
                    warnings = loaded.warnings.len(),
                    "Installed table"
                );
                self.dataset = Some(Dataset::new(loaded, ticket.0));
                self.search = SearchResults::default();
                self.error = None;
                LoadOutcome::Applied
            }
            Err(e) => {
                self.report(&TabulaError::Load(e));
                LoadOutcome::Failed
            }
        }
    }
    /// Begins and finishes a load in one step, for sources read synchronously.
    pub fn load(&mut self, result: LoadResult<LoadedTable>) -> LoadOutcome {
        let ticket = self.begin_load();
        self.finish_load(ticket, result)
    }
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }
    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }
    pub fn table(&self) -> Option<&Table> {
        self.dataset.as_ref().map(|d| &d.table)
    }
    pub fn grid(&self) -> Option<&Grid> {
        self.dataset.as_ref().map(|d| &d.grid)
    }
    pub fn grid_mut(&mut self) -> Option<&mut Grid> {
        self.dataset.as_mut().map(|d| &mut d.grid)
    }
    pub fn file_info(&self) -> Option<FileInfo> {
        self.dataset.as_ref().map(|d| FileInfo {
            display_name: d.display_name.clone(),
            summary: d.table.dimensions_label(),
        })
    }
    /// Renames the dataset and returns the resulting name.
    pub fn rename(&mut self, input: &str) -> Option<String> {
        let dataset = self.dataset.as_mut()?;
        let name = normalize_file_name(input, &dataset.display_name);
        if name != dataset.display_name {
            debug!(from = %dataset.display_name, to = %name, "Renamed dataset");
        }
        if dataset.file_name.is_some() {
            dataset.file_name = Some(name.clone());
        }
        dataset.display_name = name.clone();
        Some(name)
    }
    pub fn search(&mut self, query: &str) -> &SearchResults {
        self.search = match self.grid() {
            Some(grid) => SearchResults::run(grid, query),
            None => SearchResults::default(),
        };
        &self.search
    }
    pub fn clear_search(&mut self) {
        self.search = SearchResults::default();
    }
    pub fn search_results(&self) -> &SearchResults {
        &self.search
    }
    /// Profiles of every column of the table as loaded, ignoring grid edits.
    pub fn statistics(&self) -> Option<Vec<ColumnProfile>> {
        self.table().map(profiler::profile_all)
    }
    pub fn numeric_columns(&self) -> &[String] {
        self.dataset
            .as_ref()
            .map(|d| d.numeric_columns.as_slice())
            .unwrap_or_default()
    }
    /// Columns offered for another chart series: every column except the
    /// y-axis column and series already chosen.
    pub fn series_candidates(&self, y_column: &str, chosen: &[String]) -> Vec<String> {
        self.table()
            .map(|t| {
                t.columns()
                    .iter()
                    .filter(|c| c.as_str() != y_column && !chosen.contains(c))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
    /// Chart of the table as loaded. Blank series selections are skipped, and
    /// extra series are dropped for chart types that plot a single series.
    pub fn build_chart(&self, request: &ChartRequest) -> Result<ChartConfig> {
        let table = self.table().ok_or(ChartError::NoData)?;
        if !request.has_axes() {
            return Err(ChartError::MissingAxis.into());
        }
        let mut request = request.clone();
        if request.chart_type.supports_extra_series() {
            request.extra_series.retain(|s| !s.is_empty());
        } else {
            request.extra_series.clear();
        }
        debug!(
            chart_type = %request.chart_type,
            x = %request.x_column,
            y = %request.y_column,
            series = request.extra_series.len(),
            "Building chart"
        );
        Ok(aggregate(table, &request))
    }
    fn current_grid(&self) -> std::result::Result<&Grid, ExportError> {
        self.grid().ok_or(ExportError::NoData)
    }
    /// Exports the grid, edits included.
    pub fn export(&self, format: ExportFormat) -> Result<ExportDocument> {
        let grid = self.current_grid()?;
        let content = export::export(grid, format)?;
        let file_name = export::export_file_name(
            self.dataset.as_ref().and_then(|d| d.file_name()),
            format,
        );
        info!(file_name = %file_name, bytes = content.len(), "Exported grid");
        Ok(ExportDocument {
            file_name,
            mime_type: format.mime_type(),
            content,
        })
    }
    /// CSV text of the grid for the clipboard.
    pub fn clipboard_text(&self) -> Result<String> {
        Ok(export::to_csv(self.current_grid()?)?)
    }
    pub fn print_document(&self) -> Result<String> {
        let grid = self.current_grid()?;
        let title = self
            .dataset
            .as_ref()
            .and_then(|d| d.file_name())
            .unwrap_or(self.print_fallback_title.as_str());
        Ok(export::to_print_html(grid, title))
    }
    /// Records `error` for the error region.
    pub fn report(&mut self, error: &TabulaError) {
        warn!(category = error.category(), "{error}");
        self.error = Some(error.user_message());
    }
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
