use crate::config::TurbineConfig;
use crate::curve::power_curve::PowerCurve;
use crate::math::grid::{decimal_places, half_open_range, round_to};
use crate::math::spline::QuadraticSpline;
use crate::prelude::{CurveError, CurveResult};
use crate::telemetry::log::LogManager;

/// Keys closer than this fraction of the step are one sample.
const KEY_TOLERANCE_FRACTION: f64 = 1e-6;

/// Builds the piecewise power curve for one turbine configuration.
pub struct CurveBuilder {
    config: TurbineConfig,
    logger: LogManager,
}

impl CurveBuilder {
    pub fn new(config: TurbineConfig) -> Self {
        Self {
            config,
            logger: LogManager::new(),
        }
    }

    /// Validates the configuration, fits the ramp and merges the anchor sets.
    ///
    /// Nothing is computed when the configuration is rejected.
    pub fn build(&self) -> CurveResult<PowerCurve> {
        self.config.validate()?;

        let TurbineConfig {
            cut_in,
            rated,
            cut_out,
            end,
            rated_power,
            precision,
        } = self.config;
        // Only the dense ramp grid is rounded; anchors keep the configured speeds.
        let decimals = decimal_places(cut_in).max(decimal_places(precision));

        let ramp_anchors = [
            (cut_in - precision, 0.0),
            (cut_in, 0.0),
            (rated, rated_power),
            (rated + precision, rated_power),
        ];
        let xs: Vec<f64> = ramp_anchors.iter().map(|(x, _)| *x).collect();
        let ys: Vec<f64> = ramp_anchors.iter().map(|(_, y)| *y).collect();
        let spline = QuadraticSpline::fit(&xs, &ys)?;

        let ramp_speeds = half_open_range(
            round_to(cut_in + precision, decimals),
            rated - precision,
            precision,
            decimals,
        );
        self.logger.detail(&format!(
            "ramp sampled at {} wind speeds between {} and {}",
            ramp_speeds.len(),
            cut_in,
            rated
        ));

        let tolerance = (precision * KEY_TOLERANCE_FRACTION).max(end * f64::EPSILON * 16.0);
        let mut curve = PowerCurve::with_tolerance(tolerance);
        for wind_speed in ramp_speeds {
            let power = spline.evaluate(wind_speed).ok_or_else(|| {
                CurveError::Interpolation(format!(
                    "wind speed {wind_speed} outside the ramp anchors"
                ))
            })?;
            curve.insert(wind_speed, power.max(0.0));
        }

        for (wind_speed, power) in ramp_anchors {
            curve.insert(wind_speed, power);
        }

        let plateau_anchors = [
            (0.0, 0.0),
            (cut_out - precision, rated_power),
            (cut_out, 0.0),
            (end, 0.0),
        ];
        for (wind_speed, power) in plateau_anchors {
            curve.insert(wind_speed, power);
        }

        self.logger.record(&format!(
            "power curve built: {} samples, peak {:.1} kW",
            curve.len(),
            curve.max_power()
        ));
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_curve() -> PowerCurve {
        CurveBuilder::new(TurbineConfig::default()).build().unwrap()
    }

    fn assert_curve_invariants(curve: &PowerCurve, config: &TurbineConfig) {
        let speeds: Vec<f64> = curve.iter().map(|(x, _)| x).collect();
        assert!(speeds.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(curve.iter().all(|(_, power)| power >= 0.0));
        assert_eq!(curve.first().unwrap().wind_speed, 0.0);
        assert_eq!(curve.first().unwrap().power, 0.0);
        assert_eq!(curve.last().unwrap().wind_speed, config.end);
        assert_eq!(curve.last().unwrap().power, 0.0);
        assert_eq!(curve.power_at(config.cut_in - config.precision), Some(0.0));
        assert_eq!(curve.power_at(config.cut_out), Some(0.0));
        assert_eq!(curve.power_at(config.rated), Some(config.rated_power));
        assert_eq!(
            curve.power_at(config.cut_out - config.precision),
            Some(config.rated_power)
        );
    }

    #[test]
    fn default_curve_matches_reference_points() {
        let curve = default_curve();
        assert_eq!(curve.power_at(0.0), Some(0.0));
        assert_eq!(curve.power_at(15.0), Some(2000.0));
        assert_eq!(curve.power_at(24.99), Some(2000.0));
        assert_eq!(curve.power_at(25.0), Some(0.0));
        assert_eq!(curve.power_at(30.0), Some(0.0));
        assert_curve_invariants(&curve, &TurbineConfig::default());
    }

    #[test]
    fn default_curve_sample_count() {
        // 3.51..=14.98 at 0.01 plus eight anchors
        assert_eq!(default_curve().len(), 1148 + 8);
    }

    #[test]
    fn ramp_rises_monotonically_to_rated_power() {
        let curve = default_curve();
        let ramp: Vec<f64> = curve
            .iter()
            .filter(|(x, _)| (3.5..=15.0).contains(x))
            .map(|(_, y)| y)
            .collect();
        assert!(ramp.windows(2).all(|pair| pair[0] <= pair[1] + 1e-9));
        assert!(ramp.iter().all(|&y| y <= 2000.0 + 1e-9));
        let midpoint = curve.power_at(9.25).unwrap();
        assert!((midpoint - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn plateau_holds_rated_power_until_cut_out() {
        let curve = default_curve();
        assert_eq!(curve.power_at(15.01), Some(2000.0));
        assert_eq!(curve.evaluate(20.0), Some(2000.0));
        assert!(curve.power_at(20.0).is_none());
        assert_eq!(curve.evaluate(27.5), Some(0.0));
        assert_eq!(curve.evaluate(1.0), Some(0.0));
    }

    #[test]
    fn invalid_order_fails_before_building() {
        let config = TurbineConfig::new(15.0, 3.5, 25.0, 30.0, 2000.0, 0.01);
        let err = CurveBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, CurveError::OutOfOrder { .. }));
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn coarse_configuration_keeps_invariants() {
        let config = TurbineConfig::new(2.0, 10.0, 20.0, 22.0, 500.0, 0.5);
        let curve = CurveBuilder::new(config).build().unwrap();
        assert_curve_invariants(&curve, &config);
        // 2.5..=9.0 at 0.5 plus eight anchors
        assert_eq!(curve.len(), 14 + 8);
    }

    #[test]
    fn off_grid_thresholds_keep_their_configured_speeds() {
        let config = TurbineConfig::new(3.01, 3.04, 3.5, 4.0, 100.0, 0.1);
        let curve = CurveBuilder::new(config).build().unwrap();
        assert_curve_invariants(&curve, &config);
        assert_eq!(curve.power_at(3.01), Some(0.0));
        assert_eq!(curve.power_at(3.04), Some(100.0));
        assert_eq!(curve.power_at(3.14), Some(100.0));

        let config = TurbineConfig {
            cut_out: 25.025,
            ..Default::default()
        };
        let curve = CurveBuilder::new(config).build().unwrap();
        assert_curve_invariants(&curve, &config);
        let edge: Vec<(f64, f64)> = curve.iter().filter(|(x, _)| *x > 15.02).collect();
        assert_eq!(edge.len(), 3);
        assert!((edge[0].0 - 25.015).abs() < 1e-12);
        assert_eq!(edge[0].1, 2000.0);
        assert_eq!(edge[1], (25.025, 0.0));
        assert_eq!(edge[2], (30.0, 0.0));
    }

    #[test]
    fn line_between_shoulder_and_cut_out_is_interpolated() {
        let curve = default_curve();
        assert!((curve.evaluate(24.996).unwrap() - 800.0).abs() < 1e-6);
        assert!((curve.evaluate(24.994).unwrap() - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn cut_out_anchor_overrides_rated_shoulder() {
        let config = TurbineConfig::new(1.0, 2.0, 2.1, 3.0, 100.0, 0.1);
        let curve = CurveBuilder::new(config).build().unwrap();
        assert_eq!(curve.power_at(2.0), Some(100.0));
        assert_eq!(curve.power_at(2.1), Some(0.0));
        assert!(curve.iter().all(|(_, power)| power >= 0.0));
    }
}
