// File: crates/figkit-core/src/figure.rs
// Summary: Figure surface owning a dense grid of panels, with raster and vector rendering through Skia.
// Notes:
// - Drawing happens in points (1/72 inch). Raster targets scale the canvas
//   by `dpi / 72`; PDF and SVG pages are sized in points directly.

use std::io::Cursor;
use std::rc::Rc;

use skia_safe as skia;

use crate::context::{self, Style};
use crate::error::{FigError, Result};
use crate::export::ImageFormat;
use crate::geometry::Rect;
use crate::grid::linspace;
use crate::panel::{Panel, SharedLimits};
use crate::text::{Anchor, TextShaper};
use crate::types::{inches_to_px, POINTS_PER_INCH};

/// Options passed through unchanged from a subplot request to the figure.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureOptions {
    pub facecolor: skia::Color,
    /// All panels share one x range.
    pub sharex: bool,
    /// All panels share one y range.
    pub sharey: bool,
    /// Size panel margins from measured text; follows the active style when `None`.
    pub constrained_layout: Option<bool>,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self { facecolor: skia::Color::WHITE, sharex: false, sharey: false, constrained_layout: None }
    }
}

impl FigureOptions {
    pub fn facecolor(mut self, c: skia::Color) -> Self { self.facecolor = c; self }
    pub fn sharex(mut self, on: bool) -> Self { self.sharex = on; self }
    pub fn sharey(mut self, on: bool) -> Self { self.sharey = on; self }
    pub fn constrained_layout(mut self, on: bool) -> Self { self.constrained_layout = Some(on); self }
}

pub struct Figure {
    width_in: f64,
    height_in: f64,
    dpi: u32,
    style: Style,
    options: FigureOptions,
    rows: usize,
    cols: usize,
    panels: Rc<[Panel]>,
    suptitle: String,
}

impl Figure {
    /// New `rows x cols` figure of `size` inches, capturing the active style.
    pub fn new_grid(rows: usize, cols: usize, size: (f64, f64), dpi: u32, options: &FigureOptions) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(FigError::InvalidArgument(format!("grid must be at least 1x1, got {rows}x{cols}")));
        }
        if !(size.0.is_finite() && size.0 > 0.0 && size.1.is_finite() && size.1 > 0.0) {
            return Err(FigError::InvalidArgument(format!("figure size must be positive, got {:?}", size)));
        }
        if dpi == 0 {
            return Err(FigError::InvalidArgument("dpi must be positive".into()));
        }
        let panels: Rc<[Panel]> = (0..rows * cols).map(|_| Panel::new()).collect();
        Ok(Self {
            width_in: size.0,
            height_in: size.1,
            dpi,
            style: context::current_style(),
            options: options.clone(),
            rows,
            cols,
            panels,
            suptitle: String::new(),
        })
    }

    /// Width and height in inches.
    pub fn size_inches(&self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn grid_shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Style captured when the figure was created.
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn options(&self) -> &FigureOptions {
        &self.options
    }

    /// Every panel, row-major.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub(crate) fn panel_buffer(&self) -> Rc<[Panel]> {
        Rc::clone(&self.panels)
    }

    pub fn set_suptitle(&mut self, title: impl Into<String>) {
        self.suptitle = title.into();
    }

    /// Pixel dimensions of a raster render at `dpi`.
    pub fn pixel_size(&self, dpi: u32) -> (i32, i32) {
        (inches_to_px(self.width_in, dpi), inches_to_px(self.height_in, dpi))
    }

    fn size_points(&self) -> (f32, f32) {
        ((self.width_in * POINTS_PER_INCH) as f32, (self.height_in * POINTS_PER_INCH) as f32)
    }

    fn shared_limits(&self) -> SharedLimits {
        let union = |a: Option<(f64, f64)>, b: Option<(f64, f64)>| match (a, b) {
            (Some((l0, h0)), Some((l1, h1))) => Some((l0.min(l1), h0.max(h1))),
            (a, b) => a.or(b),
        };
        let mut shared = SharedLimits::default();
        for p in self.panels.iter() {
            let (x, y) = p.data_limits();
            if self.options.sharex {
                shared.x = union(shared.x, x);
            }
            if self.options.sharey {
                shared.y = union(shared.y, y);
            }
        }
        shared
    }

    /// Paint the whole figure onto `canvas`, in points.
    pub fn draw(&self, canvas: &skia::Canvas) {
        let profile = &self.style.profile;
        let (w, h) = self.size_points();
        canvas.clear(self.options.facecolor);

        let shaper = TextShaper::new(&profile.font.family);
        let pad = (profile.spacing.pad_inches * POINTS_PER_INCH) as f32;
        let mut top = pad;
        if !self.suptitle.is_empty() {
            let size = profile.font.figure_title_size as f32;
            shaper.draw(canvas, &self.suptitle, w * 0.5, pad + size, size, profile.colors.title, Anchor::Center);
            top += size * 1.4;
        }

        let fixed = !self.options.constrained_layout.unwrap_or(profile.constrained_layout);
        let shared = self.shared_limits();
        let xs = linspace(pad as f64, (w - pad) as f64, self.cols + 1);
        let ys = linspace(top as f64, (h - pad) as f64, self.rows + 1);
        for (i, panel) in self.panels.iter().enumerate() {
            let (r, c) = (i / self.cols, i % self.cols);
            let cell = Rect::from_ltrb(xs[c] as f32, ys[r] as f32, xs[c + 1] as f32, ys[r + 1] as f32);
            panel.draw(canvas, cell, profile, &shaper, shared, fixed);
        }
    }

    /// Render to an unpremultiplied RGBA8 buffer: `(pixels, width, height, stride)`.
    pub fn render_rgba8(&self, dpi: u32) -> Result<(Vec<u8>, u32, u32, usize)> {
        if dpi == 0 {
            return Err(FigError::InvalidArgument("dpi must be positive".into()));
        }
        let (w, h) = self.pixel_size(dpi);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| FigError::Render(format!("failed to create {w}x{h} raster surface")))?;
        {
            let canvas = surface.canvas();
            let s = dpi as f32 / POINTS_PER_INCH as f32;
            canvas.scale((s, s));
            self.draw(canvas);
        }
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(FigError::Render("reading back raster pixels failed".into()));
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    fn render_pdf(&self) -> Result<Vec<u8>> {
        let (w, h) = self.size_points();
        let mut out = Vec::new();
        {
            let document = skia::pdf::new_document(&mut out, None);
            let mut page = document.begin_page((w, h), None);
            self.draw(page.canvas());
            page.end_page().close();
        }
        if out.is_empty() {
            return Err(FigError::Render("PDF backend produced no output".into()));
        }
        Ok(out)
    }

    fn render_svg(&self) -> Vec<u8> {
        let (w, h) = self.size_points();
        let canvas = skia::svg::Canvas::new(skia::Rect::from_wh(w, h), None);
        self.draw(&canvas);
        canvas.end().as_bytes().to_vec()
    }

    /// Encode the figure as `format`. `dpi` applies to raster formats.
    pub fn encode(&self, format: ImageFormat, dpi: u32) -> Result<Vec<u8>> {
        let raster = match format {
            ImageFormat::Pdf => return self.render_pdf(),
            ImageFormat::Svg => return Ok(self.render_svg()),
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        };
        let (pixels, w, h, _) = self.render_rgba8(dpi)?;
        let img = image::RgbaImage::from_raw(w, h, pixels)
            .ok_or_else(|| FigError::Render("pixel buffer does not match image size".into()))?;
        let mut out = Cursor::new(Vec::new());
        if raster == image::ImageFormat::Jpeg {
            // no alpha channel in JPEG
            image::DynamicImage::ImageRgba8(img).to_rgb8().write_to(&mut out, raster)?;
        } else {
            img.write_to(&mut out, raster)?;
        }
        Ok(out.into_inner())
    }
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("size_inches", &(self.width_in, self.height_in))
            .field("dpi", &self.dpi)
            .field("grid", &(self.rows, self.cols))
            .finish()
    }
}
