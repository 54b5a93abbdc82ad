// File: crates/figkit-core/src/types.rs
// Summary: Shared units and paddings.

/// PostScript points per inch; figures are drawn in points.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Margins around a panel's plotting area, in points.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    pub fn even(v: f32) -> Self { Self::new(v, v, v, v) }
}

impl Default for Insets {
    fn default() -> Self {
        Self::even(0.0)
    }
}

/// Convert inches to device pixels at `dpi`, at least one pixel.
pub fn inches_to_px(inches: f64, dpi: u32) -> i32 {
    ((inches * dpi as f64).round() as i32).max(1)
}
