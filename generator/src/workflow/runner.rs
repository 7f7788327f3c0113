use anyhow::Context;
use turbinecore::{CurveBuilder, PowerCurve, TurbineConfig};

pub struct WorkflowResult {
    pub curve: PowerCurve,
    pub turbine: TurbineConfig,
}

impl WorkflowResult {
    pub fn summary(&self) -> String {
        let (start, end) = self.curve.domain().unwrap_or((0.0, 0.0));
        format!(
            "samples {}, wind speed {:.2}..{:.2} m/s, peak {:.1} kW",
            self.curve.len(),
            start,
            end,
            self.curve.max_power()
        )
    }
}

#[derive(Clone)]
pub struct Runner {
    turbine: TurbineConfig,
}

impl Runner {
    pub fn new(turbine: TurbineConfig) -> Self {
        Self { turbine }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let curve = CurveBuilder::new(self.turbine)
            .build()
            .context("building power curve")?;
        Ok(WorkflowResult {
            curve,
            turbine: self.turbine,
        })
    }
}
