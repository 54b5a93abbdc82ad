// File: crates/figkit-core/src/colormap.rs
// Summary: Listed and linear colormaps built from the palette, plus a process-wide name registry.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use skia_safe as skia;

use crate::error::{FigError, Result};
use crate::palette;

/// Prefix shared by every registered colormap name.
pub const PREFIX: &str = "eri_";

#[derive(Clone, Debug, PartialEq)]
pub enum Colormap {
    /// Discrete lookup: `t` selects one of `colors` by bucket.
    Listed { name: String, colors: Vec<skia::Color> },
    /// Piecewise-linear interpolation between evenly spaced stops.
    Linear { name: String, stops: Vec<skia::Color> },
}

impl Colormap {
    pub fn listed(name: impl Into<String>, colors: Vec<skia::Color>) -> Self {
        Colormap::Listed { name: name.into(), colors }
    }

    pub fn linear(name: impl Into<String>, stops: Vec<skia::Color>) -> Self {
        Colormap::Linear { name: name.into(), stops }
    }

    pub fn name(&self) -> &str {
        match self {
            Colormap::Listed { name, .. } | Colormap::Linear { name, .. } => name,
        }
    }

    /// Same map with its colors in reverse order, named `<name>_r`.
    pub fn reversed(&self) -> Self {
        match self {
            Colormap::Listed { name, colors } => {
                Colormap::listed(format!("{name}_r"), colors.iter().rev().copied().collect())
            }
            Colormap::Linear { name, stops } => {
                Colormap::linear(format!("{name}_r"), stops.iter().rev().copied().collect())
            }
        }
    }

    /// Color at `t`, clamped to [0, 1]. NaN maps to the first color.
    pub fn color_at(&self, t: f64) -> skia::Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Listed { colors, .. } => {
                if colors.is_empty() {
                    return skia::Color::TRANSPARENT;
                }
                let n = colors.len();
                let idx = ((t * n as f64).floor() as usize).min(n - 1);
                colors[idx]
            }
            Colormap::Linear { stops, .. } => match stops.len() {
                0 => skia::Color::TRANSPARENT,
                1 => stops[0],
                n => {
                    let pos = t * (n - 1) as f64;
                    let i = (pos.floor() as usize).min(n - 2);
                    lerp(stops[i], stops[i + 1], pos - i as f64)
                }
            },
        }
    }

    /// RGBA at `t` as floats in [0, 1].
    pub fn rgba(&self, t: f64) -> [f64; 4] {
        let c = self.color_at(t);
        [c.r(), c.g(), c.b(), c.a()].map(|v| v as f64 / 255.0)
    }

    /// Map `values` through the colormap after normalising to their min/max.
    pub fn map_values(&self, values: &[f64]) -> Vec<skia::Color> {
        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = if hi > lo { hi - lo } else { 1.0 };
        values
            .iter()
            .map(|&v| self.color_at(if lo.is_finite() { (v - lo) / span } else { 0.0 }))
            .collect()
    }
}

fn lerp(a: skia::Color, b: skia::Color, f: f64) -> skia::Color {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    skia::Color::from_argb(mix(a.a(), b.a()), mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

fn registry() -> &'static BTreeMap<String, Colormap> {
    static REGISTRY: OnceLock<BTreeMap<String, Colormap>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut maps = Vec::new();

        // Discrete: the whole palette as a listed map.
        maps.push(Colormap::listed(format!("{PREFIX}colors"), palette::discrete()));

        // Continuous: two-stop linear maps between palette entries.
        for (name, from, to) in palette::CONTINUOUS {
            maps.push(Colormap::linear(format!("{PREFIX}{name}"), vec![from.color(), to.color()]));
        }

        let mut out = BTreeMap::new();
        for cmap in maps {
            let rev = cmap.reversed();
            out.insert(rev.name().to_string(), rev);
            out.insert(cmap.name().to_string(), cmap);
        }
        log::trace!("registered {} colormaps", out.len());
        out
    })
}

/// Look up a registered colormap by name.
pub fn get(name: &str) -> Option<&'static Colormap> {
    registry().get(name)
}

/// Like [`get`], failing with `InvalidArgument` for unknown names.
pub fn require(name: &str) -> Result<&'static Colormap> {
    get(name).ok_or_else(|| FigError::InvalidArgument(format!("unknown colormap '{name}'")))
}

/// All registered names, sorted.
pub fn names() -> Vec<&'static str> {
    registry().keys().map(String::as_str).collect()
}

/// Convenience: the continuous map from darkred to darkblue.
pub fn red_blue() -> &'static Colormap {
    &registry()[&format!("{PREFIX}red_blue")]
}
