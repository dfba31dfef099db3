//! Atomic report persistence.
//!
//! Both renders are produced in memory first. Each is written to a temporary
//! file in its target directory and renamed into place only after both
//! temporaries were written, so an interrupted or failed run never leaves a
//! partial report behind.

use std::io::Write;
use std::path::Path;

use reproai_core::entities::Report;
use tempfile::{NamedTempFile, TempPath};

use crate::{OutputPaths, ReportError, html::render_html};

/// Render and write the JSON and HTML views of `report`.
///
/// # Errors
///
/// Returns [`ReportError`] if rendering fails or either file cannot be
/// written. Nothing new is persisted in that case, and a JSON view from an
/// earlier run is left as it was.
pub fn write_report(report: &Report, paths: &OutputPaths) -> Result<(), ReportError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    let html = render_html(report)?;

    let json_tmp = stage(&paths.json, json.as_bytes())?;
    let html_tmp = stage(&paths.html, html.as_bytes())?;

    // A JSON view already on disk is parked next to the target so a failed
    // HTML rename can put it back instead of leaving a mismatched pair.
    let previous = park_existing(&paths.json)?;

    if let Err(e) = json_tmp.persist(&paths.json) {
        restore(&paths.json, previous);
        return Err(ReportError::io(&paths.json)(e.error));
    }
    if let Err(e) = html_tmp.persist(&paths.html) {
        restore(&paths.json, previous);
        return Err(ReportError::io(&paths.html)(e.error));
    }

    tracing::info!(
        json = %paths.json.display(),
        html = %paths.html.display(),
        "report written"
    );
    Ok(())
}

/// Write `contents` to a temporary file next to `target`.
fn stage(target: &Path, contents: &[u8]) -> Result<NamedTempFile, ReportError> {
    let dir = parent_dir(target);
    std::fs::create_dir_all(dir).map_err(ReportError::io(dir))?;

    let mut file = NamedTempFile::new_in(dir).map_err(ReportError::io(dir))?;
    file.write_all(contents).map_err(ReportError::io(target))?;
    file.flush().map_err(ReportError::io(target))?;
    Ok(file)
}

/// Move an existing file at `target` onto a temporary path beside it.
///
/// The returned path deletes the parked copy when dropped.
fn park_existing(target: &Path) -> Result<Option<TempPath>, ReportError> {
    if !target.is_file() {
        return Ok(None);
    }
    let dir = parent_dir(target);
    let parked = NamedTempFile::new_in(dir)
        .map_err(ReportError::io(dir))?
        .into_temp_path();
    std::fs::rename(target, &parked).map_err(ReportError::io(target))?;
    Ok(Some(parked))
}

/// Undo a JSON rename: bring back the parked file, or remove the new one.
fn restore(target: &Path, previous: Option<TempPath>) {
    let result = match &previous {
        Some(parked) => std::fs::rename(parked, target),
        None => match std::fs::remove_file(target) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        },
    };
    if let Err(error) = result {
        tracing::warn!(path = %target.display(), %error, "failed to roll back report write");
    }
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
