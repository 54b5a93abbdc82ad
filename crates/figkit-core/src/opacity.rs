// File: crates/figkit-core/src/opacity.rs
// Summary: Per-layer alpha for stacks of overlapping marks.
// Notes:
// - Compositing model: `n` identical layers drawn bottom-to-top with the
//   standard "over" operator on an opaque background. A stack of layers at
//   alpha `a` covers `1 - (1 - a)^n` of the background.

use crate::error::{FigError, Result};

/// Target cumulative opacity used by [`alpha_default`].
pub const DEFAULT_MAX_OPACITY: f64 = 0.85;

/// Per-layer alpha so that `n` stacked layers reach `max_opacity`.
///
/// `alpha(1, m) == m`, and for `m < 1` the result strictly decreases in `n`.
/// With `m == 1` every layer must be opaque, so the result is 1 for all `n`.
pub fn alpha(n: u32, max_opacity: f64) -> Result<f64> {
    if n < 1 {
        return Err(FigError::InvalidArgument(format!("layer count must be >= 1, got {n}")));
    }
    if !(max_opacity > 0.0 && max_opacity <= 1.0) {
        return Err(FigError::InvalidArgument(format!(
            "max_opacity must be in (0, 1], got {max_opacity}"
        )));
    }
    if n == 1 {
        return Ok(max_opacity);
    }
    // 1 - (1 - m)^(1/n), written with ln_1p/exp_m1 to stay accurate near m = 0.
    let a = -((-max_opacity).ln_1p() / n as f64).exp_m1();
    Ok(a.clamp(f64::MIN_POSITIVE, 1.0))
}

/// [`alpha`] with the default target of 0.85.
pub fn alpha_default(n: u32) -> Result<f64> {
    alpha(n, DEFAULT_MAX_OPACITY)
}

/// Cumulative opacity of `n` layers drawn at `alpha` each.
pub fn stacked_opacity(alpha: f64, n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    -(n as f64 * (-alpha).ln_1p()).exp_m1()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_layer_is_identity() {
        assert_eq!(alpha(1, 0.3).unwrap(), 0.3);
        assert_eq!(alpha_default(1).unwrap(), DEFAULT_MAX_OPACITY);
    }

    #[test]
    fn fully_opaque_target() {
        assert_eq!(alpha(1, 1.0).unwrap(), 1.0);
        assert_eq!(alpha(7, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn stacking_beyond_i32_layers() {
        let n = u32::MAX;
        let a = alpha(n, 0.5).unwrap();
        assert!((stacked_opacity(a, n) - 0.5).abs() < 1e-9);
        assert_eq!(stacked_opacity(1.0, n), 1.0);
        assert_eq!(stacked_opacity(0.4, 0), 0.0);
        assert_eq!(stacked_opacity(1.0, 0), 0.0);
    }

    #[test]
    fn tiny_target_stays_positive() {
        let a = alpha(1000, 1e-12).unwrap();
        assert!(a > 0.0 && a.is_finite());
    }
}
