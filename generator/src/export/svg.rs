use crate::workflow::config::WorkflowConfig;
use anyhow::{Context, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::fs;
use std::path::{Path, PathBuf};
use turbinecore::PowerCurve;

const GRID_GRAY: RGBColor = RGBColor(211, 211, 211);
const HEADROOM: f64 = 1.1;

/// Writes the power curve as a line chart to `<output_dir>/<title>.svg`.
pub struct SvgExporter {
    config: WorkflowConfig,
}

impl SvgExporter {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn export(&self, curve: &PowerCurve) -> Result<PathBuf> {
        let path = self.config.output_path();
        prepare_output_dir(&path)?;

        let root =
            SVGBackend::new(&path, (self.config.width, self.config.height)).into_drawing_area();
        draw_curve(&root, curve, &self.config)
            .with_context(|| format!("rendering chart {}", path.display()))?;
        root.present()
            .with_context(|| format!("writing chart {}", path.display()))?;

        drop(root);
        info!("Wrote plot: {}", path.display());
        Ok(path)
    }
}

fn prepare_output_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Axis ranges: the full wind-speed domain and the power range with headroom.
fn chart_bounds(curve: &PowerCurve) -> (f64, f64) {
    let x_max = curve
        .domain()
        .map(|(_, end)| end)
        .filter(|end| *end > 0.0)
        .unwrap_or(1.0);
    let mut y_max = curve.max_power() * HEADROOM;
    if !y_max.is_finite() || y_max <= 0.0 {
        y_max = 1.0;
    }
    (x_max, y_max)
}

fn draw_curve<DB>(
    root: &DrawingArea<DB, Shift>,
    curve: &PowerCurve,
    config: &WorkflowConfig,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_max, y_max) = chart_bounds(curve);
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(
            &config.title,
            FontDesc::new(FontFamily::SansSerif, 26.0, FontStyle::Normal),
        )
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .bold_line_style(GRID_GRAY.stroke_width(1))
        .light_line_style(WHITE.stroke_width(1))
        .axis_style(BLACK.stroke_width(1))
        .draw()?;

    chart.draw_series(LineSeries::new(curve.iter(), BLACK.stroke_width(2)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbinecore::{CurveBuilder, TurbineConfig};

    #[test]
    fn chart_bounds_cover_domain_with_headroom() {
        let curve = CurveBuilder::new(TurbineConfig::default()).build().unwrap();
        let (x_max, y_max) = chart_bounds(&curve);
        assert_eq!(x_max, 30.0);
        assert!((y_max - 2200.0).abs() < 1e-9);
    }

    #[test]
    fn output_directory_is_created_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkflowConfig::default().with_output_dir(dir.path().join("img"));
        let path = config.output_path();
        prepare_output_dir(&path).unwrap();
        assert!(dir.path().join("img").is_dir());
        // idempotent when the directory already exists
        prepare_output_dir(&path).unwrap();
    }
}
