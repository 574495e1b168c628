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

//! Column profiling and chart aggregation for CSV tables, plus the loading,
//! grid, search and export plumbing a viewer front end needs.

pub mod aggregator;
pub mod chart_js;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod numeric;
pub mod palette;
pub mod profiler;
pub mod search;
pub mod session;
pub mod source;
pub mod table;

pub use aggregator::{aggregate, ChartConfig, ChartDataset, ChartRequest, ChartType, SeriesData};
pub use config::ViewerConfig;
pub use error::{
    ChartError, ConfigError, ErrorReporter, ExportError, LoadError, Result, TabulaError,
};
pub use export::ExportFormat;
pub use grid::{Grid, SortOrder};
pub use numeric::{parse_numeric, parse_numeric_or_default};
pub use profiler::{profile, profile_all, ColumnProfile, NumericSummary, ProfileCard};
pub use search::SearchResults;
pub use session::{LoadOutcome, LoadTicket, Session};
pub use source::{LoadedTable, TableSource, UrlFetcher};
pub use table::{parse_csv, Record, Table};
