// File: crates/figkit-core/tests/smoke.rs
// Purpose: End-to-end styled render: profile, grid, marks, RGBA buffer and PNG bytes.

use figkit_core::style::build_named;
use figkit_core::{
    alpha, subplots, with_style, Color, FigureOptions, ImageFormat, MarkStyle, ScaleKind, SubplotOptions,
};

#[test]
fn render_smoke_rgba() {
    let doc = build_named("document").unwrap();
    let (mut fig, panels) = with_style(&doc, || {
        subplots(&SubplotOptions::new(2, 2).aspect(1.5).dpi(60).figure(FigureOptions::default().sharey(true)))
    })
    .unwrap();
    fig.set_suptitle("Smoke");

    let grid = panels.into_array2().unwrap();
    let xs: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
    let a = alpha(3, 0.85).unwrap();
    for (k, p) in grid.iter().enumerate() {
        for j in 0..3 {
            let ys: Vec<f64> = xs.iter().map(|x| (x + j as f64).sin() * (k + 1) as f64).collect();
            p.plot_with(&xs, &ys, MarkStyle::new().alpha(a).label(format!("s{j}"))).unwrap();
        }
        p.set_title(format!("panel {k}"));
        p.set_xlabel("x");
        p.set_ylabel("y");
        p.grid(true);
    }
    grid[(1, 1)].set_yscale(ScaleKind::Log10);
    grid[(0, 0)].scatter(&[1.0, 2.0], &[0.5, -0.5]).unwrap();

    let (px, w, h, stride) = fig.render_rgba8(60).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, w as usize * 4);
    // white facecolor, opaque
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
    // something other than background got drawn
    assert!(px.chunks(4).any(|c| c[0] != 255 || c[1] != 255 || c[2] != 255));
}

#[test]
fn render_smoke_png_bytes() {
    let (fig, panels) = subplots(
        &SubplotOptions::new(1, 1).figsize(2.0, 2.0).dpi(72).figure(FigureOptions::default().facecolor(Color::BLACK)),
    )
    .unwrap();
    panels.single().unwrap().plot(&[0.0, 1.0, 2.0], &[2.0, 0.0, 1.0]).unwrap();
    let bytes = fig.encode(ImageFormat::Png, 72).expect("png bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (144, 144));
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn fixed_margins_render_without_text_measurement() {
    let (fig, panels) = subplots(
        &SubplotOptions::new(1, 2).figsize(3.0, 1.5).dpi(40).figure(FigureOptions::default().constrained_layout(false)),
    )
    .unwrap();
    for p in &panels {
        p.plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
    }
    let (px, w, h, _) = fig.render_rgba8(40).unwrap();
    assert_eq!((w, h), (120, 60));
    assert_eq!(px.len(), 120 * 60 * 4);
}
