// File: crates/figkit-core/src/grid.rs
// Summary: Tick placement and tick label formatting.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// A "nice" step (1, 2, 2.5 or 5 times a power of ten) giving roughly `max_ticks` ticks.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    if !(span.is_finite() && span > 0.0) { return 1.0; }
    let raw = span / max_ticks.max(2) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    for m in [1.0, 2.0, 2.5, 5.0, 10.0] {
        if m * magnitude >= raw { return m * magnitude; }
    }
    10.0 * magnitude
}

/// Ticks inside `[min, max]` on multiples of a nice step.
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let step = nice_step(hi - lo, max_ticks);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    // no -0.0 labels
    (first..=last).map(|k| k as f64 * step).map(|v| if v == 0.0 { 0.0 } else { v }).collect()
}

/// Decade ticks for a log10 axis.
pub fn log_ticks(min: f64, max: f64) -> Vec<f64> {
    let lo = min.max(f64::MIN_POSITIVE).log10().ceil() as i32;
    let hi = max.max(f64::MIN_POSITIVE).log10().floor() as i32;
    (lo..=hi).map(|e| 10f64.powi(e)).collect()
}

/// Compact tick label: integers without a decimal point, otherwise trimmed decimals.
pub fn format_tick(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.6}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_cover_range() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(-1.0, 1.0, 4), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn tick_labels_are_compact() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(-0.5), "-0.5");
    }

    #[test]
    fn log_ticks_are_decades() {
        assert_eq!(log_ticks(0.5, 200.0), vec![1.0, 10.0, 100.0]);
    }
}
