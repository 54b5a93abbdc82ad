// File: crates/figkit-core/src/scale.rs
// Summary: Data-to-point transforms for panel axes (linear and log10).

use crate::axis::ScaleKind;

/// Maps a value range onto a point range. For y axes pass `start_px = bottom`, `end_px = top`.
#[derive(Clone, Copy, Debug)]
pub struct Scale {
    pub start_px: f32,
    pub end_px: f32,
    pub vmin: f64,
    pub vmax: f64,
    pub log: bool,
    // cached log endpoints when log is true
    log_min: f64,
    log_max: f64,
}

impl Scale {
    pub fn new(kind: ScaleKind, start_px: f32, end_px: f32, vmin: f64, vmax: f64) -> Self {
        match kind {
            ScaleKind::Linear => Self::new_linear(start_px, end_px, vmin, vmax),
            ScaleKind::Log10 => Self::new_log10(start_px, end_px, vmin, vmax),
        }
    }

    pub fn new_linear(start_px: f32, end_px: f32, vmin: f64, mut vmax: f64) -> Self {
        if (vmax - vmin).abs() < 1e-12 { vmax = vmin + 1.0; }
        Self { start_px, end_px, vmin, vmax, log: false, log_min: 0.0, log_max: 0.0 }
    }

    pub fn new_log10(start_px: f32, end_px: f32, mut vmin: f64, mut vmax: f64) -> Self {
        // Ensure strictly positive range for log scale
        let eps = 1e-12;
        vmin = if vmin <= eps { eps } else { vmin };
        vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        Self { start_px, end_px, vmin, vmax, log: true, log_min: vmin.log10(), log_max: vmax.log10() }
    }

    /// Fraction of the way from `vmin` to `vmax` (unclamped).
    #[inline]
    pub fn fraction(&self, v: f64) -> f64 {
        if self.log {
            let span = (self.log_max - self.log_min).max(1e-12);
            (v.max(1e-300).log10() - self.log_min) / span
        } else {
            (v - self.vmin) / (self.vmax - self.vmin)
        }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        self.start_px + self.fraction(v) as f32 * (self.end_px - self.start_px)
    }

    /// Whether `v` falls inside the visible range.
    pub fn contains(&self, v: f64) -> bool {
        let f = self.fraction(v);
        f.is_finite() && (-1e-9..=1.0 + 1e-9).contains(&f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints() {
        let s = Scale::new_linear(100.0, 0.0, 0.0, 10.0);
        assert_eq!(s.to_px(0.0), 100.0);
        assert_eq!(s.to_px(10.0), 0.0);
        assert_eq!(s.to_px(5.0), 50.0);
    }

    #[test]
    fn log_maps_decades_evenly() {
        let s = Scale::new_log10(0.0, 200.0, 1.0, 100.0);
        assert!((s.to_px(10.0) - 100.0).abs() < 1e-3);
        assert!(!s.contains(1000.0));
    }
}
