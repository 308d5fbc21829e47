use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RenderSettings {
    /// Typst executable, looked up on PATH unless absolute.
    #[serde(default = "default_typst")]
    pub typst: String,
    /// Font family; must cover Cyrillic.
    #[serde(default = "default_font")]
    pub font: String,
    /// Typst paper name, e.g. `a4` or `us-letter`.
    #[serde(default = "default_paper")]
    pub paper: String,
    #[serde(default = "default_margin")]
    pub margin_pt: u16,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            typst: default_typst(),
            font: default_font(),
            paper: default_paper(),
            margin_pt: default_margin(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_typst() -> String {
    "typst".to_string()
}

fn default_font() -> String {
    "Noto Sans".to_string()
}

fn default_paper() -> String {
    "a4".to_string()
}

fn default_margin() -> u16 {
    40
}

fn default_output_dir() -> String {
    "output".to_string()
}
