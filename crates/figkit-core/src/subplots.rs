// File: crates/figkit-core/src/subplots.rs
// Summary: Subplot grid construction: derive figure geometry from a per-panel aspect and wrap the panels by shape.
// Notes:
// - Geometry always starts from the active style's figure size; the result
//   shape (single / 1-D / 2-D) is decided only at the very end.

use crate::context;
use crate::error::{FigError, Result};
use crate::figure::Figure;
pub use crate::figure::FigureOptions;
use crate::panels::Panels;

/// Outward offset of the left (y) and bottom (x) spines, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Shift {
    #[default]
    None,
    /// Same offset for both spines.
    Uniform(f64),
    Pair { y: f64, x: f64 },
    /// Offset the y spine by twice the active tick length; leave x alone.
    Auto,
}

impl Shift {
    /// `(y, x)` offsets for a given tick length.
    pub fn resolve(self, tick_size: f64) -> (f64, f64) {
        match self {
            Shift::None => (0.0, 0.0),
            Shift::Uniform(v) => (v, v),
            Shift::Pair { y, x } => (y, x),
            Shift::Auto => (2.0 * tick_size, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubplotOptions {
    pub nrows: usize,
    pub ncols: usize,
    /// Per-panel width / height.
    pub aspect: Option<f64>,
    /// Per-panel width in inches.
    pub panel_width: Option<f64>,
    /// Per-panel height in inches.
    pub panel_height: Option<f64>,
    /// Explicit figure size in inches; wins over derived geometry.
    pub figsize: Option<(f64, f64)>,
    pub dpi: Option<u32>,
    /// Return a 2-D grid as a row-major 1-D run.
    pub flatten: bool,
    pub shift: Shift,
    pub figure: FigureOptions,
}

impl Default for SubplotOptions {
    fn default() -> Self {
        Self {
            nrows: 1,
            ncols: 1,
            aspect: None,
            panel_width: None,
            panel_height: None,
            figsize: None,
            dpi: None,
            flatten: false,
            shift: Shift::None,
            figure: FigureOptions::default(),
        }
    }
}

impl SubplotOptions {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self { nrows, ncols, ..Self::default() }
    }
    pub fn aspect(mut self, aspect: f64) -> Self { self.aspect = Some(aspect); self }
    pub fn panel_width(mut self, inches: f64) -> Self { self.panel_width = Some(inches); self }
    pub fn panel_height(mut self, inches: f64) -> Self { self.panel_height = Some(inches); self }
    pub fn figsize(mut self, w: f64, h: f64) -> Self { self.figsize = Some((w, h)); self }
    pub fn dpi(mut self, dpi: u32) -> Self { self.dpi = Some(dpi); self }
    pub fn flatten(mut self, on: bool) -> Self { self.flatten = on; self }
    pub fn shift(mut self, shift: Shift) -> Self { self.shift = shift; self }
    pub fn figure(mut self, figure: FigureOptions) -> Self { self.figure = figure; self }

    fn validate(&self) -> Result<()> {
        if self.nrows < 1 || self.ncols < 1 {
            return Err(FigError::InvalidArgument(format!(
                "nrows and ncols must be >= 1, got {}x{}",
                self.nrows, self.ncols
            )));
        }
        let positive = |name: &str, v: Option<f64>| match v {
            Some(x) if !(x.is_finite() && x > 0.0) => {
                Err(FigError::InvalidArgument(format!("{name} must be a positive finite number, got {x}")))
            }
            _ => Ok(()),
        };
        positive("aspect", self.aspect)?;
        positive("panel_width", self.panel_width)?;
        positive("panel_height", self.panel_height)?;
        positive("figsize width", self.figsize.map(|s| s.0))?;
        positive("figsize height", self.figsize.map(|s| s.1))?;
        if self.panel_width.is_some() && self.panel_height.is_some() {
            return Err(FigError::InvalidArgument("give panel_width or panel_height, not both".into()));
        }
        if self.dpi == Some(0) {
            return Err(FigError::InvalidArgument("dpi must be positive".into()));
        }
        match self.shift {
            Shift::Uniform(v) if !(v.is_finite() && v >= 0.0) => {
                Err(FigError::InvalidArgument(format!("spine shift must be >= 0, got {v}")))
            }
            Shift::Pair { y, x } if !(y.is_finite() && y >= 0.0 && x.is_finite() && x >= 0.0) => {
                Err(FigError::InvalidArgument(format!("spine shift must be >= 0, got ({y}, {x})")))
            }
            _ => Ok(()),
        }
    }
}

/// Derived sizes of a subplot grid, in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    pub figure: (f64, f64),
    pub panel: (f64, f64),
    /// Box aspect to pin on every panel, when the figure size could not honor it.
    pub box_aspect: Option<f64>,
}

/// Figure and panel sizes for `opts`, scaled from the base figure size `base`.
pub fn grid_geometry(opts: &SubplotOptions, base: (f64, f64)) -> Result<GridGeometry> {
    opts.validate()?;
    let (rows, cols) = (opts.nrows as f64, opts.ncols as f64);
    let (bw, bh) = base;
    let panel = match opts.aspect {
        Some(a) => {
            let pw = opts.panel_width.or(opts.panel_height.map(|h| h * a)).unwrap_or(bw / cols);
            (pw, pw / a)
        }
        None => {
            let (pw0, ph0) = (bw / cols, bh / rows);
            match (opts.panel_width, opts.panel_height) {
                (Some(pw), _) => (pw, ph0 * pw / pw0),
                (_, Some(ph)) => (pw0 * ph / ph0, ph),
                _ => (pw0, ph0),
            }
        }
    };
    let derived = if opts.aspect.is_none() && opts.panel_width.is_none() && opts.panel_height.is_none() {
        base
    } else {
        (cols * panel.0, rows * panel.1)
    };
    Ok(match opts.figsize {
        Some(fs) => GridGeometry {
            figure: fs,
            panel: (fs.0 / cols, fs.1 / rows),
            box_aspect: opts.aspect,
        },
        None => GridGeometry { figure: derived, panel, box_aspect: None },
    })
}

/// Create a figure with a `nrows x ncols` grid of panels.
///
/// A 1x1 grid returns the bare panel; a single row or column returns a 1-D
/// run; anything else a 2-D grid unless `flatten` is set.
pub fn subplots(opts: &SubplotOptions) -> Result<(Figure, Panels)> {
    let style = context::current_style();
    let geom = grid_geometry(opts, style.figure_size)?;
    let dpi = opts.dpi.unwrap_or(style.dpi);
    let fig = Figure::new_grid(opts.nrows, opts.ncols, geom.figure, dpi, &opts.figure)?;

    let (shift_y, shift_x) = opts.shift.resolve(style.profile.spacing.tick_size);
    for p in fig.panels() {
        p.set_box_aspect(geom.box_aspect)?;
        p.set_spine_shift(shift_y, shift_x);
    }
    log::debug!(
        "subplots {}x{}: figure {:.3}x{:.3} in, panel {:.3}x{:.3} in, dpi {}",
        opts.nrows,
        opts.ncols,
        geom.figure.0,
        geom.figure.1,
        geom.panel.0,
        geom.panel.1,
        dpi
    );

    let panels = Panels::from_grid(fig.panel_buffer(), opts.nrows, opts.ncols, opts.flatten)?;
    Ok((fig, panels))
}
