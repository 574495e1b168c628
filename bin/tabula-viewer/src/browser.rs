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

use std::path::{Path, PathBuf};
use std::process::Command;
use tabula::ExportError;
use tracing::debug;

/// Writes `html` to a fresh file in the temp directory.
pub fn write_temp_page(prefix: &str, html: &str) -> Result<PathBuf, ExportError> {
    let path = std::env::temp_dir().join(format!("{prefix}-{}.html", uuid::Uuid::new_v4()));
    std::fs::write(&path, html).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}

fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

pub fn open_in_browser(path: &Path) -> Result<(), ExportError> {
    let (program, args) = opener();
    debug!(program, path = %path.display(), "Opening in browser");
    Command::new(program)
        .args(args)
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| ExportError::Browser {
            target: path.display().to_string(),
            reason: e.to_string(),
        })
}

pub fn show_page(prefix: &str, html: &str) -> Result<PathBuf, ExportError> {
    let path = write_temp_page(prefix, html)?;
    open_in_browser(&path)?;
    Ok(path)
}
