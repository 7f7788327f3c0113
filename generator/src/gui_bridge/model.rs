use crate::workflow::config::WorkflowConfig;
use serde::{Deserialize, Serialize};
use turbinecore::{CurvePoint, PowerCurve};

/// Chart payload served to the visualizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CurveModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub rated_power: f64,
    pub points: Vec<CurvePoint>,
}

impl CurveModel {
    pub fn from_curve(curve: &PowerCurve, rated_power: f64, config: &WorkflowConfig) -> Self {
        Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            rated_power,
            points: curve.points(),
        }
    }
}
