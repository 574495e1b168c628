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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("'{name}' is not a CSV file")]
    NotCsv { name: String },
    #[error("The CSV file appears to be empty or invalid.")]
    EmptyDataset,
    #[error("Please enter a valid URL")]
    EmptyUrl,
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV parsing failed: {0}")]
    Parse(#[from] csv::Error),
}
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No table is loaded")]
    NoData,
    #[error("Both an X-axis and a Y-axis column are required")]
    MissingAxis,
}
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No table is loaded")]
    NoData,
    #[error("CSV serialisation failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV writer could not be flushed: {0}")]
    Flush(String),
    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Exported text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),
    #[error("Failed to open '{target}' in the browser: {reason}")]
    Browser { target: String, reason: String },
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: String, reason: String },
}
pub type Result<T> = std::result::Result<T, TabulaError>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;
pub type ExportResult<T> = std::result::Result<T, ExportError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
impl TabulaError {
    pub fn category(&self) -> &'static str {
        match self {
            TabulaError::Load(_) => "Load",
            TabulaError::Chart(_) => "Chart",
            TabulaError::Export(_) => "Export",
            TabulaError::Config(_) => "Configuration",
            TabulaError::Io(_) => "I/O",
        }
    }
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TabulaError::Load(LoadError::EmptyUrl)
            | TabulaError::Chart(ChartError::MissingAxis) => ErrorSeverity::Warning,
            TabulaError::Chart(_) => ErrorSeverity::Info,
            TabulaError::Config(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
    /// Text shown in the error region of the viewer.
    pub fn user_message(&self) -> String {
        match self {
            TabulaError::Load(LoadError::NotCsv { .. }) => {
                "Please select a valid CSV file.".to_string()
            }
            TabulaError::Load(LoadError::EmptyDataset) => {
                "The CSV file appears to be empty or invalid.".to_string()
            }
            TabulaError::Load(LoadError::Read { .. }) => {
                "Error reading file. Please try again.".to_string()
            }
            TabulaError::Load(LoadError::EmptyUrl) => "Please enter a valid URL".to_string(),
            TabulaError::Load(e @ (LoadError::HttpStatus { .. }
            | LoadError::Http(_)
            | LoadError::InvalidUrl { .. })) => format!("Error loading CSV: {e}"),
            TabulaError::Load(LoadError::Parse(e)) => format!("Error processing CSV file: {e}"),
            TabulaError::Chart(ChartError::NoData) => "Please load a CSV file first.".to_string(),
            TabulaError::Chart(ChartError::MissingAxis) => {
                "Please select both X-axis and Y-axis columns.".to_string()
            }
            TabulaError::Export(ExportError::Clipboard(_)) => {
                "Failed to copy to clipboard".to_string()
            }
            _ => self.to_string(),
        }
    }
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            TabulaError::Load(LoadError::NotCsv { .. }) => vec![
                "Choose a file with a .csv extension".to_string(),
            ],
            TabulaError::Load(LoadError::EmptyDataset) => vec![
                "Check that the file has a header row followed by data rows".to_string(),
                "Check the delimiter is a comma".to_string(),
            ],
            TabulaError::Load(LoadError::HttpStatus { .. } | LoadError::Http(_)) => vec![
                "Check the URL is reachable from this machine".to_string(),
                "Servers must return the raw CSV text, not an HTML page".to_string(),
            ],
            TabulaError::Config(_) => vec![
                "Remove the configuration file to fall back to defaults".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}
impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "INFO",
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
    pub fn color_code(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "\x1b[36m",
            ErrorSeverity::Warning => "\x1b[33m",
            ErrorSeverity::Error => "\x1b[31m",
            ErrorSeverity::Critical => "\x1b[35m",
        }
    }
}
/// Formats errors for terminal output.
pub struct ErrorReporter {
    pub show_suggestions: bool,
    pub colored_output: bool,
}
impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            show_suggestions: true,
            colored_output: true,
        }
    }
    pub fn plain() -> Self {
        Self {
            show_suggestions: true,
            colored_output: false,
        }
    }
    pub fn report(&self, error: &TabulaError) -> String {
        let severity = error.severity();
        let mut output = String::new();
        if self.colored_output {
            output.push_str(severity.color_code());
        }
        output.push_str(&format!(
            "[{}] {}: {}\n",
            severity.as_str(),
            error.category(),
            error.user_message()
        ));
        if self.colored_output {
            output.push_str("\x1b[0m");
        }
        if self.show_suggestions {
            let suggestions = error.suggestions();
            if !suggestions.is_empty() {
                output.push_str("\nSuggestions:\n");
                for suggestion in suggestions {
                    output.push_str(&format!("  • {suggestion}\n"));
                }
            }
        }
        output
    }
}
impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
