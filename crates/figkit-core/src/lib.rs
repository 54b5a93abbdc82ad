// File: crates/figkit-core/src/lib.rs
// Summary: Core library entry point; exports styling, subplot grids, panel containers and figure export.

pub mod error;
pub mod palette;
pub mod colormap;
pub mod opacity;
pub mod style;
pub mod context;
pub mod types;
pub mod geometry;
pub mod grid;
pub mod axis;
pub mod scale;
pub mod text;
pub mod panel;
pub mod panels;
pub mod figure;
pub mod subplots;
pub mod export;

pub use error::{FigError, Result};
pub use palette::NamedColor;
pub use colormap::Colormap;
pub use opacity::{alpha, alpha_default, stacked_opacity, DEFAULT_MAX_OPACITY};
pub use style::{build_style, font_abs, font_rel, Profile, StyleOptions, StyleProfile, StyleValue};
pub use context::{current_style, reset_style, style_context, use_style, with_style, Style, StyleGuard};
pub use axis::ScaleKind;
pub use panel::{MarkStyle, Panel};
pub use panels::{Ix, PanelArray1, PanelArray2, Panels, Selection};
pub use figure::{Figure, FigureOptions};
pub use subplots::{grid_geometry, subplots, GridGeometry, Shift, SubplotOptions};
pub use export::{save_figures, save_figures_as, ImageFormat, OptimizerConfig, SaveOptions};

/// Re-exported so callers can name colors without a direct skia dependency.
pub use skia_safe::Color;
