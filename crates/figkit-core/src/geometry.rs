// File: crates/figkit-core/src/geometry.rs
// Summary: Lightweight rectangle math in points for panel placement.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center_x(&self) -> f32 { (self.left + self.right) * 0.5 }
    pub fn center_y(&self) -> f32 { (self.top + self.bottom) * 0.5 }

    /// Shrink by the given insets; never inverts.
    pub fn inset(&self, insets: &crate::types::Insets) -> Self {
        let left = self.left + insets.left;
        let top = self.top + insets.top;
        let right = (self.right - insets.right).max(left + 1.0);
        let bottom = (self.bottom - insets.bottom).max(top + 1.0);
        Self { left, top, right, bottom }
    }

    /// Largest centered sub-rectangle with `width / height == aspect`.
    pub fn fit_aspect(&self, aspect: f32) -> Self {
        if !(aspect.is_finite() && aspect > 0.0) {
            return *self;
        }
        let (w, h) = (self.width(), self.height());
        if w / h > aspect {
            let nw = h * aspect;
            Self::from_ltwh(self.center_x() - nw * 0.5, self.top, nw, h)
        } else {
            let nh = w / aspect;
            Self::from_ltwh(self.left, self.center_y() - nh * 0.5, w, nh)
        }
    }

    pub fn to_skia(&self) -> skia::Rect {
        skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_aspect_keeps_ratio_and_center() {
        let r = Rect::from_ltwh(0.0, 0.0, 200.0, 100.0);
        let tall = r.fit_aspect(0.5);
        assert!((tall.width() / tall.height() - 0.5).abs() < 1e-6);
        assert!((tall.center_x() - r.center_x()).abs() < 1e-6);
        let wide = r.fit_aspect(4.0);
        assert!((wide.width() - 200.0).abs() < 1e-6);
        assert!((wide.height() - 50.0).abs() < 1e-6);
    }
}
