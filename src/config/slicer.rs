use crate::{ExtractionConfig, TemplateGeometry};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Directory receiving one `NN_<label>.png` per sprite.
    pub dir: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    /// Also write the recomposed `sheet.png` into `dir`.
    #[serde(default)]
    pub compose_sheet: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlicerConfig {
    pub input_path: PathBuf,
    pub output: OutputConfig,
    pub geometry: TemplateGeometry,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Row-major sprite labels; `cell_NN` names are used when absent.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl SlicerConfig {
    pub fn resolved_labels(&self) -> Vec<String> {
        match &self.labels {
            Some(labels) => labels.clone(),
            None => (0..crate::types::CELL_COUNT)
                .map(|i| format!("cell_{i:02}"))
                .collect(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<SlicerConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<SlicerConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
