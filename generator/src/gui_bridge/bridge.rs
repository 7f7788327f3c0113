use crate::gui_bridge::model::CurveModel;
use anyhow::{anyhow, Result};
use log::{error, info};
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Holds the latest curve and serves it at `GET /curve`.
pub struct GuiBridge {
    state: Arc<RwLock<CurveModel>>,
}

impl GuiBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CurveModel::default())),
        }
    }

    /// Starts the HTTP endpoint on a background thread.
    pub fn spawn(&self, address: SocketAddr) -> thread::JoinHandle<()> {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());

        let curve_route = warp::path("curve")
            .and(warp::get())
            .and(state_filter)
            .map(|state: Arc<RwLock<CurveModel>>| {
                let model = match state.read() {
                    Ok(guard) => guard.clone(),
                    Err(poisoned) => poisoned.into_inner().clone(),
                };
                warp::reply::json(&model)
            });

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            info!("serving curve on http://{}/curve", address);
            runtime.block_on(async move {
                warp::serve(curve_route).run(address).await;
            });
        })
    }

    pub fn publish(&self, model: &CurveModel) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow!("curve state lock poisoned"))?;
        *guard = model.clone();
        println!(
            "[GUI] curve points: {}, rated power: {:.1} kW",
            guard.points.len(),
            guard.rated_power
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> CurveModel {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for GuiBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use turbinecore::TurbineConfig;

    #[test]
    fn gui_bridge_updates_state() {
        let result = Runner::new(TurbineConfig::default()).execute().unwrap();
        let model = CurveModel::from_curve(
            &result.curve,
            result.turbine.rated_power,
            &WorkflowConfig::default(),
        );
        let gui = GuiBridge::new();
        assert!(gui.snapshot().points.is_empty());

        gui.publish(&model).unwrap();
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.points.len(), result.curve.len());
        assert_eq!(snapshot.title, "Idealised Wind Turbine Power Curve");
        assert_eq!(snapshot.rated_power, 2000.0);
    }

    #[test]
    fn curve_model_serializes_points_in_order() {
        let result = Runner::new(TurbineConfig::default()).execute().unwrap();
        let model = CurveModel::from_curve(
            &result.curve,
            result.turbine.rated_power,
            &WorkflowConfig::default(),
        );
        let json = serde_json::to_value(&model).unwrap();
        let points = json["points"].as_array().unwrap();
        assert_eq!(points.first().unwrap()["wind_speed"], 0.0);
        assert_eq!(points.last().unwrap()["wind_speed"], 30.0);
        let decoded: CurveModel = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, model);
    }
}
