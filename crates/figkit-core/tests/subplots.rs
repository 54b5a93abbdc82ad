// File: crates/figkit-core/tests/subplots.rs
// Purpose: Grid shapes, flattening, aspect-driven geometry and option pass-through.

use figkit_core::style::build_named;
use figkit_core::{
    current_style, subplots, with_style, FigError, FigureOptions, Panels, Shift, SubplotOptions,
};

#[test]
fn container_shape_matches_request() {
    for (rows, cols) in [(1, 1), (1, 4), (3, 1), (2, 2), (2, 3), (4, 5)] {
        let (fig, panels) = subplots(&SubplotOptions::new(rows, cols)).unwrap();
        assert_eq!(fig.grid_shape(), (rows, cols));
        assert_eq!(panels.len(), rows * cols);
        let expected = match (rows, cols) {
            (1, 1) => vec![],
            (1, n) | (n, 1) => vec![n],
            (r, c) => vec![r, c],
        };
        assert_eq!(panels.shape(), expected, "{rows}x{cols}");
    }
}

#[test]
fn one_by_one_is_a_bare_panel() {
    let (fig, panels) = subplots(&SubplotOptions::default()).unwrap();
    let p = panels.into_single().unwrap();
    assert!(p.same_as(&fig.panels()[0]));
}

#[test]
fn flatten_two_by_three_is_row_major() {
    let (fig, panels) = subplots(&SubplotOptions::new(2, 3).flatten(true)).unwrap();
    let flat = match panels {
        Panels::Array1(a) => a,
        other => panic!("expected 1-D, got shape {:?}", other.shape()),
    };
    assert_eq!(flat.len(), 6);
    assert_eq!(flat.shape(), [6]);
    for (i, p) in flat.iter().enumerate() {
        assert!(p.same_as(&fig.panels()[i]));
    }
}

#[test]
fn flatten_matches_grid_traversal() {
    let (_fig, panels) = subplots(&SubplotOptions::new(2, 3)).unwrap();
    let grid = panels.into_array2().unwrap();
    let flat = grid.flatten();
    let mut i = 0;
    for r in 0..2 {
        for c in 0..3 {
            assert!(grid[(r, c)].same_as(&flat[i]));
            i += 1;
        }
    }
}

#[test]
fn aspect_holds_per_panel_for_any_grid() {
    let doc = build_named("document").unwrap();
    with_style(&doc, || {
        assert_eq!(current_style().figure_size, (4.5, 2.5));
        for (rows, cols) in [(1, 1), (1, 3), (2, 2), (3, 2), (5, 1)] {
            let opts = SubplotOptions::new(rows, cols).aspect(0.5);
            let geom = figkit_core::grid_geometry(&opts, current_style().figure_size).unwrap();
            assert!((geom.panel.0 / geom.panel.1 - 0.5).abs() < 1e-9, "{rows}x{cols}");
            let (fig, _) = subplots(&opts).unwrap();
            let (w, h) = fig.size_inches();
            let per_panel = (w / cols as f64) / (h / rows as f64);
            assert!((per_panel - 0.5).abs() < 1e-9, "{rows}x{cols}: {per_panel}");
        }
    });
}

#[test]
fn no_aspect_uses_active_figure_size() {
    let talk = build_named("presentation").unwrap();
    let (fig, _) = with_style(&talk, || subplots(&SubplotOptions::new(2, 2))).unwrap();
    assert_eq!(fig.size_inches(), (7.0, 4.0));
    assert_eq!(fig.dpi(), 300);
}

#[test]
fn figure_keeps_style_it_was_created_with() {
    let doc = build_named("document").unwrap();
    let (fig, _) = with_style(&doc, || subplots(&SubplotOptions::default())).unwrap();
    assert_eq!(fig.style().profile.font.size, 10.0);
    assert_eq!(current_style().profile.font.size, 11.0);
}

#[test]
fn pass_through_options_reach_the_figure() {
    let fo = FigureOptions::default().sharex(true).facecolor(figkit_core::Color::BLACK);
    let (fig, _) = subplots(&SubplotOptions::new(1, 2).figure(fo.clone()).dpi(150)).unwrap();
    assert_eq!(fig.options(), &fo);
    assert_eq!(fig.dpi(), 150);
}

#[test]
fn shift_and_box_aspect_applied_to_every_panel() {
    let opts = SubplotOptions::new(2, 2).aspect(1.0).figsize(6.0, 3.0).shift(Shift::Auto);
    let (_fig, panels) = subplots(&opts).unwrap();
    let tick = current_style().profile.spacing.tick_size;
    for p in &panels {
        assert_eq!(p.box_aspect(), Some(1.0));
        assert_eq!(p.spine_shift(), (2.0 * tick, 0.0));
    }
}

#[test]
fn malformed_grid_request() {
    assert!(matches!(subplots(&SubplotOptions::new(0, 2)), Err(FigError::InvalidArgument(_))));
    assert!(matches!(subplots(&SubplotOptions::new(1, 1).aspect(-1.0)), Err(FigError::InvalidArgument(_))));
}
