pub mod typst;

pub use typst::{compile_pdf, to_typst};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::RenderSettings;
use crate::error::{DocumentError, Result};
use crate::layout::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Typst,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Typst => "typ",
            OutputFormat::Json => "json",
        }
    }

    /// Guess the format from an output file extension, PDF when there is none.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension() {
            Some(ext) => ext.to_string_lossy().parse(),
            None => Ok(OutputFormat::Pdf),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "typst" | "typ" => Ok(OutputFormat::Typst),
            "json" => Ok(OutputFormat::Json),
            _ => Err(DocumentError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Write a layout tree to `output_path` in the requested format.
pub fn write_document(
    doc: &Document,
    format: OutputFormat,
    settings: &RenderSettings,
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match format {
        OutputFormat::Pdf => compile_pdf(&to_typst(doc, settings), settings, output_path)?,
        OutputFormat::Typst => fs::write(output_path, to_typst(doc, settings))?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(doc)
                .map_err(|e| DocumentError::PdfGeneration(e.to_string()))?;
            fs::write(output_path, json)?;
        }
    }

    log::info!("wrote {} ({:?})", output_path.display(), format);
    Ok(())
}

/// Default file path for a rendered document, e.g. `output/contract-lz-2025-001.pdf`.
pub fn default_output_path(
    output_dir: &Path,
    kind: &str,
    number: &str,
    format: OutputFormat,
) -> PathBuf {
    let name = sanitize_filename(number, "document");
    output_dir.join(format!("{kind}-{name}.{}", format.extension()))
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !result.is_empty() {
            result.push('-');
            last_dash = true;
        }
    }

    let result = result.trim_matches('-');
    if result.is_empty() {
        return fallback.to_string();
    }

    result.to_string()
}
