// File: crates/figkit-core/src/panel.rs
// Summary: Panel handles (one drawing area of a figure), their marks, and styled Skia rendering.
// Notes:
// - A `Panel` is a cheap handle; clones refer to the same drawing area. The
//   figure that created it holds the same handles, so drawing through any
//   clone shows up when the figure is rendered or exported.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use skia_safe as skia;

use crate::axis::{Axis, ScaleKind};
use crate::colormap;
use crate::error::{FigError, Result};
use crate::geometry::Rect;
use crate::grid::{format_tick, log_ticks, nice_ticks};
use crate::scale::Scale;
use crate::style::StyleProfile;
use crate::text::{Anchor, TextShaper};
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    Line,
    Scatter,
}

/// How a mark picks its color.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Next entry of the style's color cycle, fixed when the mark was added.
    Cycle(usize),
    Fixed(skia::Color),
    /// One color per point (scatter only).
    PerPoint(Vec<skia::Color>),
}

/// Optional appearance overrides for a mark.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkStyle {
    pub color: Option<skia::Color>,
    /// Opacity in (0, 1].
    pub alpha: Option<f64>,
    /// Line width (lines) or marker diameter (scatter), in points.
    pub size: Option<f64>,
    /// Legend entry.
    pub label: Option<String>,
}

impl MarkStyle {
    pub fn new() -> Self { Self::default() }
    pub fn color(mut self, c: skia::Color) -> Self { self.color = Some(c); self }
    pub fn alpha(mut self, a: f64) -> Self { self.alpha = Some(a); self }
    pub fn size(mut self, s: f64) -> Self { self.size = Some(s); self }
    pub fn label(mut self, l: impl Into<String>) -> Self { self.label = Some(l.into()); self }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub kind: MarkKind,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub paint: Paint,
    pub alpha: f64,
    pub size: Option<f64>,
    pub label: Option<String>,
}

/// Everything drawn into one panel.
#[derive(Clone, Debug, Default)]
pub struct PanelState {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub marks: Vec<Mark>,
    /// Width / height of the plotting box; free when `None`.
    pub box_aspect: Option<f64>,
    /// Outward spine offsets in points: (left/y spine, bottom/x spine).
    pub spine_shift: (f64, f64),
    pub grid: bool,
    cycle_next: usize,
}

/// Handle to one drawing panel.
#[derive(Clone)]
pub struct Panel {
    inner: Rc<RefCell<PanelState>>,
}

impl Panel {
    pub(crate) fn new() -> Self {
        Self { inner: Rc::new(RefCell::new(PanelState::default())) }
    }

    /// Read-only view of the panel contents.
    pub fn state(&self) -> Ref<'_, PanelState> {
        self.inner.borrow()
    }

    /// Whether both handles refer to the same drawing area.
    pub fn same_as(&self, other: &Panel) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn plot(&self, xs: &[f64], ys: &[f64]) -> Result<()> {
        self.plot_with(xs, ys, MarkStyle::default())
    }

    pub fn plot_with(&self, xs: &[f64], ys: &[f64], style: MarkStyle) -> Result<()> {
        self.push_mark(MarkKind::Line, xs, ys, None, style)
    }

    pub fn scatter(&self, xs: &[f64], ys: &[f64]) -> Result<()> {
        self.scatter_with(xs, ys, MarkStyle::default())
    }

    pub fn scatter_with(&self, xs: &[f64], ys: &[f64], style: MarkStyle) -> Result<()> {
        self.push_mark(MarkKind::Scatter, xs, ys, None, style)
    }

    /// Scatter colored by `values` through the registered colormap `cmap`.
    pub fn scatter_mapped(&self, xs: &[f64], ys: &[f64], values: &[f64], cmap: &str, style: MarkStyle) -> Result<()> {
        if values.len() != xs.len() {
            return Err(FigError::InvalidArgument(format!(
                "{} color values for {} points",
                values.len(),
                xs.len()
            )));
        }
        let colors = colormap::require(cmap)?.map_values(values);
        self.push_mark(MarkKind::Scatter, xs, ys, Some(Paint::PerPoint(colors)), style)
    }

    fn push_mark(&self, kind: MarkKind, xs: &[f64], ys: &[f64], paint: Option<Paint>, style: MarkStyle) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(FigError::InvalidArgument(format!("x has {} values but y has {}", xs.len(), ys.len())));
        }
        let alpha = style.alpha.unwrap_or(1.0);
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(FigError::InvalidArgument(format!("alpha must be in (0, 1], got {alpha}")));
        }
        if let Some(s) = style.size {
            if !(s.is_finite() && s > 0.0) {
                return Err(FigError::InvalidArgument(format!("mark size must be positive, got {s}")));
            }
        }
        let mut st = self.inner.borrow_mut();
        let paint = match (paint, style.color) {
            (Some(p), _) => p,
            (None, Some(c)) => Paint::Fixed(c),
            (None, None) => {
                let slot = st.cycle_next;
                st.cycle_next += 1;
                Paint::Cycle(slot)
            }
        };
        st.marks.push(Mark {
            kind,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            paint,
            alpha,
            size: style.size,
            label: style.label,
        });
        Ok(())
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.inner.borrow_mut().title = title.into();
    }

    pub fn set_xlabel(&self, label: impl Into<String>) {
        self.inner.borrow_mut().x_axis.label = label.into();
    }

    pub fn set_ylabel(&self, label: impl Into<String>) {
        self.inner.borrow_mut().y_axis.label = label.into();
    }

    pub fn set_xlim(&self, lo: f64, hi: f64) -> Result<()> {
        let lim = check_limits(lo, hi)?;
        self.inner.borrow_mut().x_axis.limits = Some(lim);
        Ok(())
    }

    pub fn set_ylim(&self, lo: f64, hi: f64) -> Result<()> {
        let lim = check_limits(lo, hi)?;
        self.inner.borrow_mut().y_axis.limits = Some(lim);
        Ok(())
    }

    pub fn set_xscale(&self, kind: ScaleKind) {
        self.inner.borrow_mut().x_axis.kind = kind;
    }

    pub fn set_yscale(&self, kind: ScaleKind) {
        self.inner.borrow_mut().y_axis.kind = kind;
    }

    /// Fix the plotting box to `width / height == aspect`, or free it with `None`.
    pub fn set_box_aspect(&self, aspect: Option<f64>) -> Result<()> {
        if let Some(a) = aspect {
            if !(a.is_finite() && a > 0.0) {
                return Err(FigError::InvalidArgument(format!("box aspect must be positive, got {a}")));
            }
        }
        self.inner.borrow_mut().box_aspect = aspect;
        Ok(())
    }

    pub fn box_aspect(&self) -> Option<f64> {
        self.inner.borrow().box_aspect
    }

    /// Move the left (y) and bottom (x) spines outward by the given points.
    pub fn set_spine_shift(&self, y: f64, x: f64) {
        self.inner.borrow_mut().spine_shift = (y.max(0.0), x.max(0.0));
    }

    pub fn spine_shift(&self) -> (f64, f64) {
        self.inner.borrow().spine_shift
    }

    pub fn grid(&self, on: bool) {
        self.inner.borrow_mut().grid = on;
    }

    pub fn title(&self) -> String {
        self.inner.borrow().title.clone()
    }

    pub fn mark_count(&self) -> usize {
        self.inner.borrow().marks.len()
    }

    /// Finite (x, y) data bounds, honoring log scales (non-positive values skipped).
    pub fn data_limits(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        let st = self.inner.borrow();
        let usable = |v: f64, kind: ScaleKind| v.is_finite() && (kind == ScaleKind::Linear || v > 0.0);
        let mut xr: Option<(f64, f64)> = None;
        let mut yr: Option<(f64, f64)> = None;
        for m in &st.marks {
            for (&x, &y) in m.xs.iter().zip(&m.ys) {
                if !usable(x, st.x_axis.kind) || !usable(y, st.y_axis.kind) {
                    continue;
                }
                xr = Some(xr.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
                yr = Some(yr.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
            }
        }
        (xr, yr)
    }
}

impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.inner.borrow();
        f.debug_struct("Panel")
            .field("title", &st.title)
            .field("marks", &st.marks.len())
            .field("box_aspect", &st.box_aspect)
            .finish()
    }
}

fn check_limits(lo: f64, hi: f64) -> Result<(f64, f64)> {
    if lo.is_finite() && hi.is_finite() && lo != hi {
        Ok((lo, hi))
    } else {
        Err(FigError::InvalidArgument(format!("invalid axis limits ({lo}, {hi})")))
    }
}

// ---- rendering ---------------------------------------------------------------

/// Limits imposed across panels when axes are shared.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SharedLimits {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
}

fn ticks_for(axis: &Axis, lo: f64, hi: f64) -> Vec<f64> {
    match axis.kind {
        ScaleKind::Linear => nice_ticks(lo, hi, 5),
        ScaleKind::Log10 => log_ticks(lo, hi),
    }
}

fn stroke(color: skia::Color, width: f64) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width as f32);
    p.set_color(color);
    p
}

impl Panel {
    /// Draw into `cell` (figure points). `fixed_margins` skips text measurement.
    pub(crate) fn draw(
        &self,
        canvas: &skia::Canvas,
        cell: Rect,
        style: &StyleProfile,
        shaper: &TextShaper,
        shared: SharedLimits,
        fixed_margins: bool,
    ) {
        let st = self.inner.borrow();
        let (data_x, data_y) = self.data_limits();
        let (x0, x1) = st.x_axis.resolve(shared.x.or(data_x), style.spacing.x_margin);
        let (y0, y1) = st.y_axis.resolve(shared.y.or(data_y), style.spacing.y_margin);
        let xticks = ticks_for(&st.x_axis, x0, x1);
        let yticks = ticks_for(&st.y_axis, y0, y1);
        let ylabels: Vec<String> = yticks.iter().map(|&v| format_tick(v)).collect();

        let font = &style.font;
        let sp = &style.spacing;
        let (shift_y, shift_x) = st.spine_shift;

        let insets = if fixed_margins {
            Insets::new(cell.width() * 0.125, cell.width() * 0.05, cell.height() * 0.1, cell.height() * 0.12)
        } else {
            let widest = ylabels
                .iter()
                .map(|l| shaper.measure_width(l, font.tick_label_size as f32))
                .fold(0.0f32, f32::max);
            let ylab = if st.y_axis.label.is_empty() { 0.0 } else { sp.label_pad + font.label_size };
            let xlab = if st.x_axis.label.is_empty() { 0.0 } else { sp.label_pad + font.label_size };
            let title = if st.title.is_empty() { font.tick_label_size * 0.5 } else { sp.title_pad + font.title_size };
            Insets::new(
                (shift_y + sp.tick_size + sp.tick_pad + ylab) as f32 + widest,
                font.tick_label_size as f32,
                title as f32,
                (shift_x + sp.tick_size + sp.tick_pad + font.tick_label_size * 1.2 + xlab) as f32,
            )
        };
        let mut plot = cell.inset(&insets);
        if let Some(a) = st.box_aspect {
            plot = plot.fit_aspect(a as f32);
        }

        let sx = Scale::new(st.x_axis.kind, plot.left, plot.right, x0, x1);
        let sy = Scale::new(st.y_axis.kind, plot.bottom, plot.top, y0, y1);
        let spine_x = plot.left - shift_y as f32;
        let spine_y = plot.bottom + shift_x as f32;

        let draw_grid = || {
            let p = stroke(style.colors.grid, style.lines.grid);
            for &v in xticks.iter().filter(|&&v| sx.contains(v)) {
                let x = sx.to_px(v);
                canvas.draw_line((x, plot.top), (x, plot.bottom), &p);
            }
            for &v in yticks.iter().filter(|&&v| sy.contains(v)) {
                let y = sy.to_px(v);
                canvas.draw_line((plot.left, y), (plot.right, y), &p);
            }
        };
        if st.grid && style.axis_below {
            draw_grid();
        }

        // Marks, clipped to the plotting box
        canvas.save();
        canvas.clip_rect(plot.to_skia(), skia::ClipOp::Intersect, true);
        for m in &st.marks {
            draw_mark(canvas, m, &sx, &sy, style);
        }
        canvas.restore();

        if st.grid && !style.axis_below {
            draw_grid();
        }

        // Spines
        let spine = stroke(style.colors.edge, style.lines.axes);
        canvas.draw_line((spine_x, plot.top), (spine_x, plot.bottom), &spine);
        canvas.draw_line((plot.left, spine_y), (plot.right, spine_y), &spine);
        if style.spines_right {
            canvas.draw_line((plot.right, plot.top), (plot.right, plot.bottom), &spine);
        }
        if style.spines_top {
            canvas.draw_line((plot.left, plot.top), (plot.right, plot.top), &spine);
        }

        // Ticks and tick labels
        let tick = stroke(style.colors.tick, style.lines.tick);
        let tsize = sp.tick_size as f32;
        let tpad = sp.tick_pad as f32;
        let tl = font.tick_label_size as f32;
        for &v in xticks.iter().filter(|&&v| sx.contains(v)) {
            let x = sx.to_px(v);
            canvas.draw_line((x, spine_y), (x, spine_y + tsize), &tick);
            shaper.draw(canvas, &format_tick(v), x, spine_y + tsize + tpad + tl, tl, style.colors.tick_label, Anchor::Center);
        }
        for (&v, label) in yticks.iter().zip(&ylabels).filter(|(v, _)| sy.contains(**v)) {
            let y = sy.to_px(v);
            canvas.draw_line((spine_x - tsize, y), (spine_x, y), &tick);
            shaper.draw(canvas, label, spine_x - tsize - tpad, y + tl * 0.35, tl, style.colors.tick_label, Anchor::Right);
        }

        // Axis labels and title
        let lsize = font.label_size as f32;
        shaper.draw(
            canvas,
            &st.x_axis.label,
            plot.center_x(),
            spine_y + tsize + tpad + tl * 1.2 + sp.label_pad as f32 + lsize,
            lsize,
            style.colors.label,
            Anchor::Center,
        );
        let widest_left = insets.left - (shift_y as f32 + tsize + tpad);
        shaper.draw_vertical(
            canvas,
            &st.y_axis.label,
            (spine_x - tsize - tpad - widest_left + lsize * 0.5).max(cell.left + lsize * 0.5),
            plot.center_y(),
            lsize,
            style.colors.label,
        );
        shaper.draw(
            canvas,
            &st.title,
            plot.center_x(),
            plot.top - sp.title_pad as f32,
            font.title_size as f32,
            style.colors.title,
            Anchor::Center,
        );

        draw_legend(canvas, &st.marks, plot, style, shaper);
    }
}

fn mark_color(m: &Mark, style: &StyleProfile) -> skia::Color {
    match &m.paint {
        Paint::Cycle(i) => style.cycle_color(*i),
        Paint::Fixed(c) => *c,
        Paint::PerPoint(cs) => cs.first().copied().unwrap_or(style.colors.text),
    }
}

fn draw_mark(canvas: &skia::Canvas, m: &Mark, sx: &Scale, sy: &Scale, style: &StyleProfile) {
    let finite = |x: f64, y: f64| {
        let (px, py) = (sx.to_px(x), sy.to_px(y));
        (px.is_finite() && py.is_finite()).then_some((px, py))
    };
    match m.kind {
        MarkKind::Line => {
            let mut paint = stroke(mark_color(m, style), m.size.unwrap_or(style.lines.data));
            paint.set_alpha_f(m.alpha as f32);
            paint.set_stroke_join(skia::paint::Join::Round);
            paint.set_stroke_cap(skia::paint::Cap::Round);
            // NaN/inf values break the line into separate runs
            let mut path = skia::Path::new();
            let mut pen_down = false;
            for (&x, &y) in m.xs.iter().zip(&m.ys) {
                match finite(x, y) {
                    Some(p) if pen_down => { path.line_to(p); }
                    Some(p) => { path.move_to(p); pen_down = true; }
                    None => pen_down = false,
                }
            }
            canvas.draw_path(&path, &paint);
        }
        MarkKind::Scatter => {
            let mut fill = skia::Paint::default();
            fill.set_anti_alias(true);
            fill.set_style(skia::paint::Style::Fill);
            let radius = (m.size.unwrap_or(style.lines.marker_size) * 0.5) as f32;
            for (i, (&x, &y)) in m.xs.iter().zip(&m.ys).enumerate() {
                let Some(p) = finite(x, y) else { continue };
                let c = match &m.paint {
                    Paint::PerPoint(cs) => cs.get(i).copied().unwrap_or(style.colors.text),
                    _ => mark_color(m, style),
                };
                fill.set_color(c);
                fill.set_alpha_f(m.alpha as f32);
                canvas.draw_circle(p, radius, &fill);
            }
        }
    }
}

fn draw_legend(canvas: &skia::Canvas, marks: &[Mark], plot: Rect, style: &StyleProfile, shaper: &TextShaper) {
    let entries: Vec<(&Mark, &str)> = marks.iter().filter_map(|m| m.label.as_deref().map(|l| (m, l))).collect();
    if entries.is_empty() {
        return;
    }
    let size = style.font.legend_size as f32;
    let swatch = size * 1.6;
    let row_h = size * 1.4;
    let right = plot.right - size * 0.5;
    let widest = entries.iter().map(|(_, l)| shaper.measure_width(l, size)).fold(0.0f32, f32::max);
    let left = right - widest - swatch - size * 0.5;
    for (row, (m, label)) in entries.iter().enumerate() {
        let cy = plot.top + size * 0.5 + row_h * (row as f32 + 0.5);
        let color = mark_color(m, style);
        match m.kind {
            MarkKind::Line => {
                let p = stroke(color, m.size.unwrap_or(style.lines.data));
                canvas.draw_line((left, cy), (left + swatch, cy), &p);
            }
            MarkKind::Scatter => {
                let mut p = skia::Paint::default();
                p.set_anti_alias(true);
                p.set_color(color);
                canvas.draw_circle((left + swatch * 0.5, cy), (style.lines.marker_size * 0.5) as f32, &p);
            }
        }
        shaper.draw(canvas, label, left + swatch + size * 0.5, cy + size * 0.35, size, style.colors.text, Anchor::Left);
    }
}
