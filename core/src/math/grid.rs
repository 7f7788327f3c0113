const MAX_DECIMALS: usize = 12;

/// Number of decimal places in the shortest representation of `step`.
pub fn decimal_places(step: f64) -> i32 {
    let repr = format!("{}", step);
    let places = repr
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0);
    places.min(MAX_DECIMALS) as i32
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Points `start, start + step, ...` strictly below `stop`, each rounded to
/// `decimals` places.
pub fn half_open_range(start: f64, stop: f64, step: f64, decimals: i32) -> Vec<f64> {
    let stop = round_to(stop, decimals);
    if step.is_nan() || step <= 0.0 || stop <= start {
        return Vec::new();
    }
    // one extra index absorbs float error in the count; the filter trims it
    let count = ((stop - start) / step).ceil() as usize + 1;
    (0..count)
        .map(|index| round_to(start + index as f64 * step, decimals))
        .filter(|value| *value < stop)
        .collect()
}
