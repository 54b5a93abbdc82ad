// File: crates/figkit-core/src/style.rs
// Summary: Declarative style profiles; a few named options expand into a complete, harmonically scaled theme.
// Notes:
// - Building a profile is pure. Activating it is the caller's job (see `context`).
// - Every derived size is a fixed function of the base font size.

use std::fmt;
use std::str::FromStr;

use skia_safe as skia;

use crate::context;
use crate::error::{FigError, Result};
use crate::palette::{self, NamedColor};

/// ggplot2 line widths are expressed in units of roughly 0.75 mm.
pub const GGPLOT2_MM: f64 = 0.75;
/// Millimetres to points.
pub const MM_TO_PT: f64 = 72.0 / 10.0 / 2.54;

/// Base font size when no profile and no explicit size are given.
pub const FALLBACK_BASE_SIZE: f64 = 11.0;

const TEXT_GRAY: f64 = 0.25;
const LIMITS_GRAY: f64 = 0.65;

/// Relative (harmonic) font size: five steps double the size.
pub fn font_rel(n: f64) -> f64 {
    2f64.powf(n / 5.0)
}

/// Absolute font size `n` harmonic steps away from the active base size.
pub fn font_abs(n: f64) -> f64 {
    font_rel(n) * context::current_style().profile.font.size
}

/// Default line width for spines, ticks and grids, derived from the base font size.
pub fn default_line_size(base_size: f64) -> f64 {
    base_size / (10.0 / 0.3) * GGPLOT2_MM * MM_TO_PT
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Small figures for reports: 10pt text, 4.5 x 2.5 in, 300 DPI.
    Document,
    /// Slides: 20pt text, 7 x 4 in, 300 DPI.
    Presentation,
}

impl Profile {
    pub const fn name(self) -> &'static str {
        match self {
            Profile::Document => "document",
            Profile::Presentation => "presentation",
        }
    }

    pub const fn base_size(self) -> f64 {
        match self {
            Profile::Document => 10.0,
            Profile::Presentation => 20.0,
        }
    }

    /// Figure width and height in inches.
    pub const fn figure_size(self) -> (f64, f64) {
        match self {
            Profile::Document => (4.5, 2.5),
            Profile::Presentation => (7.0, 4.0),
        }
    }

    pub const fn dpi(self) -> u32 {
        300
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(Profile::Document),
            "presentation" => Ok(Profile::Presentation),
            other => Err(FigError::InvalidConfiguration(format!(
                "unknown profile '{other}' (expected 'document' or 'presentation')"
            ))),
        }
    }
}

/// Named inputs to [`build_style`].
#[derive(Clone, Debug, PartialEq)]
pub struct StyleOptions {
    pub profile: Option<Profile>,
    /// Base font size in points; overrides the profile default.
    pub base_size: Option<f64>,
    /// Generic ("sans-serif") or specific family name.
    pub base_family: String,
    /// Spine/tick width in points; derived from the base size when unset.
    pub base_line_size: Option<f64>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self { profile: None, base_size: None, base_family: "sans-serif".to_string(), base_line_size: None }
    }
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Parse and set the profile by name.
    pub fn profile_name(self, name: &str) -> Result<Self> {
        Ok(self.profile(name.parse()?))
    }

    pub fn base_size(mut self, size: f64) -> Self {
        self.base_size = Some(size);
        self
    }

    pub fn base_family(mut self, family: impl Into<String>) -> Self {
        self.base_family = family.into();
        self
    }

    pub fn base_line_size(mut self, width: f64) -> Self {
        self.base_line_size = Some(width);
        self
    }

    pub fn build(&self) -> Result<StyleProfile> {
        build_style(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FontSizes {
    pub family: String,
    pub size: f64,
    pub label_size: f64,
    pub title_size: f64,
    pub figure_title_size: f64,
    pub tick_label_size: f64,
    pub legend_size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineWidths {
    /// Spines.
    pub axes: f64,
    /// Major tick marks.
    pub tick: f64,
    pub grid: f64,
    /// Data lines.
    pub data: f64,
    pub marker_size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spacing {
    /// Major tick length.
    pub tick_size: f64,
    /// Gap between tick and tick label.
    pub tick_pad: f64,
    /// Gap to an axes title.
    pub title_pad: f64,
    /// Gap to an axis label.
    pub label_pad: f64,
    /// Padding around the figure when saving, in inches.
    pub pad_inches: f64,
    pub x_margin: f64,
    pub y_margin: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    pub text: skia::Color,
    pub edge: skia::Color,
    pub tick: skia::Color,
    pub label: skia::Color,
    pub title: skia::Color,
    pub tick_label: skia::Color,
    pub grid: skia::Color,
    pub cycle: Vec<skia::Color>,
}

/// A fully resolved style description.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleProfile {
    /// Only set by a named profile; otherwise the active figure size is kept.
    pub figure_size: Option<(f64, f64)>,
    /// Only set by a named profile; otherwise the active DPI is kept.
    pub dpi: Option<u32>,
    pub font: FontSizes,
    pub lines: LineWidths,
    pub spacing: Spacing,
    pub colors: ColorScheme,
    pub spines_right: bool,
    pub spines_top: bool,
    pub constrained_layout: bool,
    pub axis_below: bool,
}

impl Default for StyleProfile {
    fn default() -> Self {
        derive(None, FALLBACK_BASE_SIZE, "sans-serif", None)
    }
}

/// A single entry of the parameter mapping view of a profile.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Integer(u32),
    Text(String),
    Flag(bool),
    Size(f64, f64),
    Color(skia::Color),
    Cycle(Vec<skia::Color>),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(v) => write!(f, "{v}"),
            StyleValue::Integer(v) => write!(f, "{v}"),
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Flag(b) => write!(f, "{b}"),
            StyleValue::Size(w, h) => write!(f, "({w}, {h})"),
            StyleValue::Color(c) => f.write_str(&palette::to_hex(*c)),
            StyleValue::Cycle(cs) => {
                let hex: Vec<String> = cs.iter().map(|c| palette::to_hex(*c)).collect();
                write!(f, "[{}]", hex.join(", "))
            }
        }
    }
}

impl StyleProfile {
    /// The profile as a flat `(parameter, value)` list, keyed by dotted names.
    pub fn entries(&self) -> Vec<(&'static str, StyleValue)> {
        use StyleValue::*;
        let mut out = Vec::with_capacity(48);
        if let Some((w, h)) = self.figure_size {
            out.push(("figure.figsize", Size(w, h)));
        }
        out.push(("font.family", Text(self.font.family.clone())));
        out.push(("font.size", Number(self.font.size)));
        out.push(("text.color", Color(self.colors.text)));
        out.push(("axes.labelsize", Number(self.font.label_size)));
        out.push(("axes.titlesize", Number(self.font.title_size)));
        out.push(("figure.titlesize", Number(self.font.figure_title_size)));
        out.push(("xtick.labelsize", Number(self.font.tick_label_size)));
        out.push(("ytick.labelsize", Number(self.font.tick_label_size)));
        out.push(("legend.fontsize", Number(self.font.legend_size)));
        out.push(("axes.spines.right", Flag(self.spines_right)));
        out.push(("axes.spines.top", Flag(self.spines_top)));
        out.push(("axes.edgecolor", Color(self.colors.edge)));
        out.push(("xtick.color", Color(self.colors.tick)));
        out.push(("ytick.color", Color(self.colors.tick)));
        out.push(("axes.labelcolor", Color(self.colors.label)));
        out.push(("axes.titlecolor", Color(self.colors.title)));
        out.push(("xtick.labelcolor", Color(self.colors.tick_label)));
        out.push(("ytick.labelcolor", Color(self.colors.tick_label)));
        out.push(("axes.linewidth", Number(self.lines.axes)));
        out.push(("xtick.major.width", Number(self.lines.tick)));
        out.push(("ytick.major.width", Number(self.lines.tick)));
        out.push(("grid.color", Color(self.colors.grid)));
        out.push(("grid.linewidth", Number(self.lines.grid)));
        out.push(("xtick.major.pad", Number(self.spacing.tick_pad)));
        out.push(("ytick.major.pad", Number(self.spacing.tick_pad)));
        out.push(("xtick.major.size", Number(self.spacing.tick_size)));
        out.push(("ytick.major.size", Number(self.spacing.tick_size)));
        out.push(("axes.titlepad", Number(self.spacing.title_pad)));
        out.push(("axes.labelpad", Number(self.spacing.label_pad)));
        out.push(("savefig.pad_inches", Number(self.spacing.pad_inches)));
        out.push(("figure.constrained_layout.use", Flag(self.constrained_layout)));
        if let Some(dpi) = self.dpi {
            out.push(("savefig.dpi", Integer(dpi)));
        }
        out.push(("lines.markersize", Number(self.lines.marker_size)));
        out.push(("lines.linewidth", Number(self.lines.data)));
        out.push(("axes.axisbelow", Flag(self.axis_below)));
        out.push(("axes.xmargin", Number(self.spacing.x_margin)));
        out.push(("axes.ymargin", Number(self.spacing.y_margin)));
        out.push(("axes.prop_cycle", Cycle(self.colors.cycle.clone())));
        out
    }

    /// Look up one parameter by its dotted name.
    pub fn get(&self, key: &str) -> Option<StyleValue> {
        self.entries().into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Cycle color for the `i`-th series.
    pub fn cycle_color(&self, i: usize) -> skia::Color {
        match self.colors.cycle.len() {
            0 => self.colors.text,
            n => self.colors.cycle[i % n],
        }
    }
}

fn check_positive(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(FigError::InvalidConfiguration(format!("{name} must be a positive finite number, got {v}")))
    }
}

/// Expand `opts` into a complete [`StyleProfile`].
///
/// Base size precedence: explicit `base_size`, then the profile default,
/// then 11pt. Figure size and DPI are only set when a profile is named.
pub fn build_style(opts: &StyleOptions) -> Result<StyleProfile> {
    let base_size = opts
        .base_size
        .or(opts.profile.map(Profile::base_size))
        .unwrap_or(FALLBACK_BASE_SIZE);
    let base_size = check_positive("base_size", base_size)?;
    let line_size = opts.base_line_size.map(|w| check_positive("base_line_size", w)).transpose()?;
    if opts.base_family.trim().is_empty() {
        return Err(FigError::InvalidConfiguration("base_family must not be empty".into()));
    }
    Ok(derive(opts.profile, base_size, &opts.base_family, line_size))
}

/// Shorthand for `build_style` with the profile given by name.
pub fn build_named(profile: &str) -> Result<StyleProfile> {
    StyleOptions::new().profile_name(profile)?.build()
}

fn derive(profile: Option<Profile>, base_size: f64, family: &str, line_size: Option<f64>) -> StyleProfile {
    let tick_size = 4.0 / 10.0 * base_size;
    let line_width = line_size.unwrap_or_else(|| default_line_size(base_size));
    let text = palette::gray(TEXT_GRAY);
    let limits = palette::gray(LIMITS_GRAY);

    StyleProfile {
        figure_size: profile.map(Profile::figure_size),
        dpi: profile.map(Profile::dpi),
        font: FontSizes {
            family: family.to_string(),
            size: base_size,
            label_size: base_size * font_rel(1.0),
            title_size: base_size * font_rel(1.0),
            figure_title_size: base_size * font_rel(2.0),
            tick_label_size: base_size * font_rel(-1.0),
            legend_size: base_size * font_rel(-1.0),
        },
        lines: LineWidths {
            axes: line_width,
            tick: line_width,
            grid: line_width,
            data: 1.25 / 10.0 * base_size,
            marker_size: 3.0 / 10.0 * base_size,
        },
        spacing: Spacing {
            tick_size,
            tick_pad: tick_size / 2.0,
            title_pad: tick_size,
            label_pad: tick_size,
            pad_inches: 10.0 / 72.0,
            x_margin: 0.05,
            y_margin: 0.05,
        },
        colors: ColorScheme {
            text,
            edge: limits,
            tick: limits,
            label: text,
            title: text,
            tick_label: text,
            grid: limits,
            cycle: NamedColor::ALL.iter().map(|c| c.color()).collect(),
        },
        spines_right: false,
        spines_top: false,
        constrained_layout: true,
        axis_below: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_rel_is_harmonic() {
        assert_eq!(font_rel(0.0), 1.0);
        assert!((font_rel(5.0) - 2.0).abs() < 1e-12);
        assert!((font_rel(-5.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn profile_names_parse_case_insensitively() {
        assert_eq!("Document".parse::<Profile>().unwrap(), Profile::Document);
        assert!(matches!("poster".parse::<Profile>(), Err(FigError::InvalidConfiguration(_))));
    }

    #[test]
    fn entries_follow_optional_figure_fields() {
        let plain = StyleProfile::default();
        assert!(plain.get("figure.figsize").is_none());
        assert!(plain.get("savefig.dpi").is_none());
        let doc = build_named("document").unwrap();
        assert_eq!(doc.get("figure.figsize"), Some(StyleValue::Size(4.5, 2.5)));
        assert_eq!(doc.get("savefig.dpi"), Some(StyleValue::Integer(300)));
    }
}
