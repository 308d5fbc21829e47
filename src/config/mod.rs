mod settings;

pub use settings::{Config, OutputSettings, RenderSettings};

use crate::error::{DocumentError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.leasing-docs/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "leasing-docs") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        DocumentError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".leasing-docs"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output dir; relative paths are taken from the config dir.
pub fn resolve_output_dir(dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        return Err(DocumentError::ConfigNotFound(config_dir.to_path_buf()));
    }
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(DocumentError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config = toml::from_str(&content)
        .map_err(|e| DocumentError::ConfigParse { path: path.clone(), source: e })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Create the config directory with template and sample files.
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.exists() {
        return Err(DocumentError::AlreadyInitialized(config_dir.to_path_buf()));
    }

    fs::create_dir_all(config_dir.join("output"))?;
    fs::create_dir_all(config_dir.join("samples"))?;

    fs::write(config_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(config_dir.join("samples/contract.json"), CONTRACT_SAMPLE)?;
    fs::write(config_dir.join("samples/invoice.json"), INVOICE_SAMPLE)?;

    log::info!("initialized config dir {}", config_dir.display());
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[render]
typst = "typst"        # path to the typst binary
font = "Noto Sans"     # must include Cyrillic glyphs
paper = "a4"           # typst paper name
margin_pt = 40

[output]
dir = "output"         # relative to this directory, or absolute / ~/...
"#;

/// Sample contract input written by `init`.
pub const CONTRACT_SAMPLE: &str = r#"{
  "contractNumber": "LZ-2025-001",
  "clientName": "Коваленко Олена Петрівна",
  "clientPhone": "+380 67 000 00 00",
  "clientEmail": "olena@example.com",
  "vehicleDescription": "Toyota Corolla 1.6 AT",
  "vehicleYear": 2021,
  "carNumber": "AA1234BB",
  "payments": [
    { "due_date": "2025-05-10", "amount": "12500.00", "status": "pending" },
    { "due_date": "2025-03-10", "amount": "12500.00", "status": "paid" },
    { "due_date": null, "amount": "3000", "status": "pending" },
    { "due_date": "2025-04-10", "amount": "12500.00", "status": "pending" }
  ]
}
"#;

/// Sample invoice input written by `init`.
pub const INVOICE_SAMPLE: &str = r#"{
  "invoice_number": "FV/2025/03/001",
  "issue_date": "05.03.2025",
  "type": "rental",
  "seller": {
    "name": "Auto Lease Sp. z o.o.",
    "address": "ul. Prosta 1, 00-001 Warszawa",
    "nip": "5250000000"
  },
  "buyer": {
    "name": "Олена Коваленко",
    "passport": "FA123456",
    "pesel": null
  },
  "line_items": [
    {
      "row_number": 1,
      "product_name": "Оренда автомобіля, березень 2025",
      "quantity": "1",
      "net_price": "2000.00",
      "net_value": "2000.00",
      "vat_percent": "23",
      "tax_amount": "460.00",
      "gross_value": "2460.00"
    }
  ],
  "total_net": "2000.00",
  "total_tax": "460.00",
  "total_gross": "2460.00"
}
"#;
