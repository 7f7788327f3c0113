use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Idealised Wind Turbine Power Curve";
pub const DEFAULT_OUTPUT_DIR: &str = "img";

/// Presentation settings for the rendered chart. The curve itself is fixed by
/// the turbine constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            x_label: "Wind Speed [m/s]".into(),
            y_label: "Power Output [kW]".into(),
            width: 1000,
            height: 600,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading render config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing render config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// `<output_dir>/<title>.svg`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.svg", self.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_output_path_matches_chart_title() {
        let cfg = WorkflowConfig::default();
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("img/Idealised Wind Turbine Power Curve.svg")
        );
    }

    #[test]
    fn output_dir_override_keeps_file_name() {
        let cfg = WorkflowConfig::default().with_output_dir(PathBuf::from("out/charts"));
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("out/charts/Idealised Wind Turbine Power Curve.svg")
        );
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"title: Turbine A\nwidth: 640\n").unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.title, "Turbine A");
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = WorkflowConfig::load("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("reading render config"));
    }
}
