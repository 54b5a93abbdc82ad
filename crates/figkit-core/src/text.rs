// File: crates/figkit-core/src/text.rs
// Summary: Text shaping for panel labels using Skia textlayout, with the style's font family first in line.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Horizontal anchor of a text run relative to its x coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

pub struct TextShaper {
    fonts: FontCollection,
    families: Vec<String>,
}

impl TextShaper {
    /// Shaper that prefers `family` (generic names expand to concrete fallbacks).
    pub fn new(family: &str) -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc, families: fallback_families(family) }
    }

    fn make_style(&self, size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(self.families.as_slice());
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = self.make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, skia::Color::TRANSPARENT);
        // width of the longest line
        p.longest_line()
    }

    /// Draw `text` with its baseline at `y`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        if text.is_empty() {
            return;
        }
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        let left = match anchor {
            Anchor::Left => x,
            Anchor::Center => x - w * 0.5,
            Anchor::Right => x - w,
        };
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (left, y - size * 0.8));
    }

    /// Draw `text` rotated 90 degrees counter-clockwise, centered on (x, y).
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        if text.is_empty() {
            return;
        }
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(-90.0, None);
        self.draw(canvas, text, 0.0, size * 0.35, size, color, Anchor::Center);
        canvas.restore();
    }
}

fn fallback_families(family: &str) -> Vec<String> {
    let generic: &[&str] = match family.trim().to_ascii_lowercase().as_str() {
        "serif" => &["Times New Roman", "Georgia", "DejaVu Serif", "serif"],
        "monospace" => &["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"],
        "sans-serif" | "sans" => &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"],
        _ => &[],
    };
    if generic.is_empty() {
        let mut v = vec![family.trim().to_string()];
        v.extend(["Arial", "DejaVu Sans", "sans-serif"].map(String::from));
        v
    } else {
        generic.iter().map(|s| s.to_string()).collect()
    }
}
