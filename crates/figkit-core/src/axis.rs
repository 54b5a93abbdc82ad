// File: crates/figkit-core/src/axis.rs
// Summary: Per-panel axis model: label, optional fixed limits and scale kind.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Axis {
    pub label: String,
    /// Fixed limits; autoscaled from data when `None`.
    pub limits: Option<(f64, f64)>,
    pub kind: ScaleKind,
}

impl Axis {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }

    /// Visible range for data spanning `data` (min, max), padded by `margin` of the span.
    pub fn resolve(&self, data: Option<(f64, f64)>, margin: f64) -> (f64, f64) {
        if let Some(lim) = self.limits {
            return lim;
        }
        let (mut lo, mut hi) = data.unwrap_or(match self.kind {
            ScaleKind::Linear => (0.0, 1.0),
            ScaleKind::Log10 => (1.0, 10.0),
        });
        match self.kind {
            ScaleKind::Linear => {
                if (hi - lo).abs() < 1e-12 {
                    lo -= 0.5;
                    hi += 0.5;
                }
                let pad = (hi - lo) * margin;
                (lo - pad, hi + pad)
            }
            ScaleKind::Log10 => {
                lo = lo.max(1e-12);
                hi = hi.max(lo * 10.0);
                let (l, h) = (lo.log10(), hi.log10());
                let pad = (h - l) * margin;
                (10f64.powf(l - pad), 10f64.powf(h + pad))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoscale_pads_by_margin() {
        let (lo, hi) = Axis::default().resolve(Some((0.0, 10.0)), 0.05);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn fixed_limits_win() {
        let mut a = Axis::new("x");
        a.limits = Some((2.0, 3.0));
        assert_eq!(a.resolve(Some((0.0, 10.0)), 0.05), (2.0, 3.0));
    }

    #[test]
    fn degenerate_span_is_widened() {
        let (lo, hi) = Axis::default().resolve(Some((4.0, 4.0)), 0.0);
        assert!(hi > lo);
    }
}
