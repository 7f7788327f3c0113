use crate::prelude::CurvePoint;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Wind speed (m/s) to power output (kW), ordered by wind speed.
///
/// Keys are stored as given. Two wind speeds closer than the curve's
/// tolerance are the same key, so float noise in `25.0 - 0.01` and `24.99`
/// does not produce two samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurve {
    samples: BTreeMap<OrderedFloat<f64>, f64>,
    tolerance: f64,
}

impl PowerCurve {
    pub(crate) fn with_tolerance(tolerance: f64) -> Self {
        Self {
            samples: BTreeMap::new(),
            tolerance,
        }
    }

    /// Last write wins; an existing key within tolerance keeps its position.
    pub(crate) fn insert(&mut self, wind_speed: f64, power: f64) {
        let key = self
            .nearest_key(wind_speed)
            .unwrap_or(OrderedFloat(wind_speed));
        self.samples.insert(key, power);
    }

    fn nearest_key(&self, wind_speed: f64) -> Option<OrderedFloat<f64>> {
        let lo = OrderedFloat(wind_speed - self.tolerance);
        let hi = OrderedFloat(wind_speed + self.tolerance);
        self.samples
            .range(lo..=hi)
            .map(|(key, _)| *key)
            .min_by(|a, b| (a.0 - wind_speed).abs().total_cmp(&(b.0 - wind_speed).abs()))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Power sampled at `wind_speed`, matching keys within tolerance.
    pub fn power_at(&self, wind_speed: f64) -> Option<f64> {
        if !wind_speed.is_finite() {
            return None;
        }
        let key = self.nearest_key(wind_speed)?;
        self.samples.get(&key).copied()
    }

    /// Linear interpolation between the neighbouring samples, as drawn by a
    /// line chart.
    pub fn evaluate(&self, wind_speed: f64) -> Option<f64> {
        if !wind_speed.is_finite() {
            return None;
        }
        let key = OrderedFloat(wind_speed);
        if let Some(power) = self.samples.get(&key) {
            return Some(*power);
        }
        let (lo_x, lo_y) = self.samples.range(..key).next_back()?;
        let (hi_x, hi_y) = self.samples.range(key..).next()?;
        let fraction = (wind_speed - lo_x.0) / (hi_x.0 - lo_x.0);
        Some(lo_y + fraction * (hi_y - lo_y))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|(x, y)| (x.0, *y))
    }

    pub fn points(&self) -> Vec<CurvePoint> {
        self.iter()
            .map(|(wind_speed, power)| CurvePoint::new(wind_speed, power))
            .collect()
    }

    pub fn first(&self) -> Option<CurvePoint> {
        self.samples
            .first_key_value()
            .map(|(x, y)| CurvePoint::new(x.0, *y))
    }

    pub fn last(&self) -> Option<CurvePoint> {
        self.samples
            .last_key_value()
            .map(|(x, y)| CurvePoint::new(x.0, *y))
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.first()?.wind_speed, self.last()?.wind_speed))
    }

    pub fn max_power(&self) -> f64 {
        self.samples.values().copied().fold(0.0, f64::max)
    }
}
