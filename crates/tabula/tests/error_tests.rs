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

use tabula::error::ErrorSeverity;
use tabula::{ChartError, ErrorReporter, ExportError, LoadError, TabulaError};

#[test]
fn test_user_messages() {
    let cases = [
        (
            TabulaError::from(LoadError::NotCsv { name: "a.txt".into() }),
            "Please select a valid CSV file.",
        ),
        (
            TabulaError::from(LoadError::EmptyDataset),
            "The CSV file appears to be empty or invalid.",
        ),
        (TabulaError::from(LoadError::EmptyUrl), "Please enter a valid URL"),
        (
            TabulaError::from(LoadError::HttpStatus { status: 503 }),
            "Error loading CSV: HTTP error! status: 503",
        ),
        (
            TabulaError::from(ExportError::Clipboard("denied".into())),
            "Failed to copy to clipboard",
        ),
    ];
    for (error, expected) in cases {
        assert_eq!(error.user_message(), expected);
    }
}

#[test]
fn test_categories_and_severity() {
    let error = TabulaError::from(ChartError::MissingAxis);
    assert_eq!(error.category(), "Chart");
    assert_eq!(error.severity(), ErrorSeverity::Warning);
    let error = TabulaError::from(LoadError::EmptyDataset);
    assert_eq!(error.severity(), ErrorSeverity::Error);
    assert!(ErrorSeverity::Critical > ErrorSeverity::Info);
}

#[test]
fn test_reporter_plain_output() {
    let report = ErrorReporter::plain().report(&TabulaError::from(LoadError::EmptyDataset));
    assert!(report.starts_with("[ERROR] Load: The CSV file appears to be empty or invalid."));
    assert!(report.contains("Suggestions:"));
    assert!(!report.contains("\x1b["));
}

#[test]
fn test_reporter_colours_by_severity() {
    let report = ErrorReporter::new().report(&TabulaError::from(LoadError::EmptyUrl));
    assert!(report.starts_with("\x1b[33m"));
    assert!(!report.contains("Suggestions:"));
}
