// File: crates/figkit-core/src/palette.rs
// Summary: Brand palette (named hex colors) and the discrete/continuous color sequences built from it.

use std::fmt;
use std::str::FromStr;

use skia_safe as skia;

use crate::error::{FigError, Result};

/// Full brand palette, in color-cycle order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    MediumBlue,
    DarkRed,
    LightBlue,
    Gray,
    Yellow,
    DarkGreen,
    Pink,
    DarkBlue,
    BrightRed,
    Brown,
    LightGreen,
    Orange,
}

impl NamedColor {
    pub const ALL: [NamedColor; 12] = [
        NamedColor::MediumBlue,
        NamedColor::DarkRed,
        NamedColor::LightBlue,
        NamedColor::Gray,
        NamedColor::Yellow,
        NamedColor::DarkGreen,
        NamedColor::Pink,
        NamedColor::DarkBlue,
        NamedColor::BrightRed,
        NamedColor::Brown,
        NamedColor::LightGreen,
        NamedColor::Orange,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            NamedColor::MediumBlue => "mediumblue",
            NamedColor::DarkRed => "darkred",
            NamedColor::LightBlue => "lightblue",
            NamedColor::Gray => "gray",
            NamedColor::Yellow => "yellow",
            NamedColor::DarkGreen => "darkgreen",
            NamedColor::Pink => "pink",
            NamedColor::DarkBlue => "darkblue",
            NamedColor::BrightRed => "brightred",
            NamedColor::Brown => "brown",
            NamedColor::LightGreen => "lightgreen",
            NamedColor::Orange => "orange",
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            NamedColor::MediumBlue => "#005E7B",
            NamedColor::DarkRed => "#D0073A",
            NamedColor::LightBlue => "#008CA5",
            NamedColor::Gray => "#777777",
            NamedColor::Yellow => "#FBC15E",
            NamedColor::DarkGreen => "#307F42",
            NamedColor::Pink => "#FFB5B8",
            NamedColor::DarkBlue => "#063157",
            NamedColor::BrightRed => "#EA0D49",
            NamedColor::Brown => "#603534",
            NamedColor::LightGreen => "#70B73F",
            NamedColor::Orange => "#F7941D",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            NamedColor::MediumBlue => (0x00, 0x5E, 0x7B),
            NamedColor::DarkRed => (0xD0, 0x07, 0x3A),
            NamedColor::LightBlue => (0x00, 0x8C, 0xA5),
            NamedColor::Gray => (0x77, 0x77, 0x77),
            NamedColor::Yellow => (0xFB, 0xC1, 0x5E),
            NamedColor::DarkGreen => (0x30, 0x7F, 0x42),
            NamedColor::Pink => (0xFF, 0xB5, 0xB8),
            NamedColor::DarkBlue => (0x06, 0x31, 0x57),
            NamedColor::BrightRed => (0xEA, 0x0D, 0x49),
            NamedColor::Brown => (0x60, 0x35, 0x34),
            NamedColor::LightGreen => (0x70, 0xB7, 0x3F),
            NamedColor::Orange => (0xF7, 0x94, 0x1D),
        }
    }

    pub fn color(self) -> skia::Color {
        let (r, g, b) = self.rgb();
        skia::Color::from_rgb(r, g, b)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedColor {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        NamedColor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FigError::InvalidArgument(format!("unknown palette color '{s}'")))
    }
}

/// Qualitative sequence: the whole palette in declaration order.
pub fn discrete() -> Vec<skia::Color> {
    NamedColor::ALL.iter().map(|c| c.color()).collect()
}

/// Endpoint pairs for the quantitative (two-stop) sequences.
pub const CONTINUOUS: [(&str, NamedColor, NamedColor); 2] = [
    ("red_cyan", NamedColor::DarkRed, NamedColor::LightBlue),
    ("red_blue", NamedColor::DarkRed, NamedColor::DarkBlue),
];

/// Parse `#RRGGBB` / `#RRGGBBAA` (leading `#` optional).
pub fn parse_hex(s: &str) -> Result<skia::Color> {
    let h = s.trim().trim_start_matches('#');
    let bad = || FigError::InvalidArgument(format!("malformed hex color '{s}'"));
    if !(h.len() == 6 || h.len() == 8) || !h.is_ascii() {
        return Err(bad());
    }
    let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).map_err(|_| bad());
    let a = if h.len() == 8 { byte(6)? } else { 255 };
    Ok(skia::Color::from_argb(a, byte(0)?, byte(2)?, byte(4)?))
}

/// Uniform gray at `level` in [0, 1] (0 = black).
pub fn gray(level: f64) -> skia::Color {
    let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_rgb(v, v, v)
}

/// Hex rendering of a color, `#RRGGBB` when opaque.
pub fn to_hex(c: skia::Color) -> String {
    if c.a() == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r(), c.g(), c.b())
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.r(), c.g(), c.b(), c.a())
    }
}
