//! Filename handling and writing downloads to disk.

use super::types::{Download, ExportError};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Image format extension for every export.
pub const EXTENSION: &str = "png";

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
///
/// # Returns
/// Generated filename with extension
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Turns a host-supplied download name into the final filename.
///
/// Blank names fall back to a timestamped name from `template`; anything
/// else gets a `.png` extension unless it already has one.
pub fn normalize_filename(requested: &str, template: &str) -> String {
    let requested = requested.trim();
    if requested.is_empty() {
        return generate_filename(template, EXTENSION);
    }

    let has_png_extension = Path::new(requested)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));

    if has_png_extension {
        requested.to_string()
    } else {
        format!("{}.{}", requested, EXTENSION)
    }
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes a download into `directory` under its own filename.
///
/// # Returns
/// Path to the saved file
pub fn write_download(download: &Download, directory: &Path) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(&download.filename);

    log::info!(
        "Saving annotated image to: {} ({} bytes)",
        file_path.display(),
        download.bytes.len()
    );

    fs::write(&file_path, &download.bytes)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
