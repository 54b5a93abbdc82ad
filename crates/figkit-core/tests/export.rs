// File: crates/figkit-core/tests/export.rs
// Purpose: Multi-format export, basename handling and optimizer behavior.

use std::path::{Path, PathBuf};

use figkit_core::{
    save_figures, save_figures_as, subplots, FigError, Figure, ImageFormat, OptimizerConfig, SaveOptions,
    SubplotOptions,
};

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target/test_out/export").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn figure() -> Figure {
    let (fig, panels) = subplots(&SubplotOptions::new(1, 2).figsize(3.0, 1.5).dpi(50)).unwrap();
    let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| (x * 0.4).sin()).collect();
    panels.iter().for_each(|p| p.plot(&xs, &ys).unwrap());
    fig
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|rd| rd.filter_map(|e| e.ok()).map(|e| e.file_name().to_string_lossy().into_owned()).collect())
        .unwrap_or_default();
    names.sort();
    names
}

fn missing_optimizer() -> OptimizerConfig {
    OptimizerConfig::new("figkit-no-such-optimizer-binary")
}

#[test]
fn png_only_without_optimizer() {
    let dir = out_dir("png_only");
    let opts = SaveOptions::new().formats([ImageFormat::Png]).optimizer(missing_optimizer());
    let written = save_figures(&figure(), dir.join("out"), &opts).unwrap();
    assert_eq!(written, vec![dir.join("out.png")]);
    assert_eq!(listing(&dir), vec!["out.png"]);
    let img = image::open(dir.join("out.png")).unwrap();
    assert_eq!((img.width(), img.height()), (150, 75));
}

#[test]
fn png_and_pdf() {
    let dir = out_dir("png_pdf");
    let opts = SaveOptions::new().formats([ImageFormat::Png, ImageFormat::Pdf]).optipng(false);
    save_figures(&figure(), dir.join("out"), &opts).unwrap();
    assert_eq!(listing(&dir), vec!["out.pdf", "out.png"]);
    let pdf = std::fs::read(dir.join("out.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn bogus_format_writes_nothing() {
    let dir = out_dir("bogus");
    let err = save_figures_as(&figure(), dir.join("out"), &["png", "svgz_bogus"]).unwrap_err();
    assert!(matches!(err, FigError::UnsupportedFormat(ref f) if f == "svgz_bogus"));
    assert!(!dir.exists() || listing(&dir).is_empty());
    assert!(matches!(save_figures_as(&figure(), dir.join("out"), &["eps"]), Err(FigError::UnsupportedFormat(_))));
}

#[test]
fn every_supported_format_is_written() {
    let dir = out_dir("all");
    let opts = SaveOptions::new().formats(ImageFormat::ALL).optipng(false);
    let written = save_figures(&figure(), dir.join("fig"), &opts).unwrap();
    assert_eq!(written.len(), ImageFormat::ALL.len());
    assert_eq!(listing(&dir), vec!["fig.jpg", "fig.pdf", "fig.png", "fig.svg", "fig.tiff", "fig.webp"]);
    let svg = std::fs::read_to_string(dir.join("fig.svg")).unwrap();
    assert!(svg.contains("<svg"));
    for name in ["fig.jpg", "fig.tiff", "fig.webp"] {
        let img = image::open(dir.join(name)).unwrap();
        assert_eq!((img.width(), img.height()), (150, 75), "{name}");
    }
}

#[test]
fn default_formats_and_suffix_handling() {
    let dir = out_dir("suffix");
    let opts = SaveOptions::new().optipng(false);
    save_figures(&figure(), dir.join("a.svg"), &opts).unwrap();
    save_figures(&figure(), dir.join("b.v2"), &opts).unwrap();
    assert_eq!(
        listing(&dir),
        vec!["a.pdf", "a.png", "a.svg", "b.v2.pdf", "b.v2.png"]
    );
}

#[test]
fn existing_directory_is_fine() {
    let dir = out_dir("twice");
    let opts = SaveOptions::new().formats([ImageFormat::Png]).optipng(false);
    save_figures(&figure(), dir.join("nested/out"), &opts).unwrap();
    save_figures(&figure(), dir.join("nested/out"), &opts).unwrap();
    assert_eq!(listing(&dir.join("nested")), vec!["out.png"]);
}

#[test]
fn io_errors_name_the_offending_path() {
    let dir = out_dir("blocked");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("plain_file");
    std::fs::write(&file, b"not a directory").unwrap();
    let opts = SaveOptions::new().formats([ImageFormat::Png]).optipng(false);
    let err = save_figures(&figure(), file.join("out"), &opts).unwrap_err();
    match &err {
        FigError::Io { path, .. } => assert_eq!(path, &file),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(&file.display().to_string()), "{err}");
    assert_eq!(listing(&dir), vec!["plain_file"]);
}

#[test]
fn encoder_failure_writes_nothing() {
    let dir = out_dir("encode_fails");
    // vector formats encode fine; no raster surface can be that large
    let opts = SaveOptions::new()
        .formats([ImageFormat::Pdf, ImageFormat::Svg, ImageFormat::Png])
        .dpi(u32::MAX)
        .optipng(false);
    let err = save_figures(&figure(), dir.join("out"), &opts).unwrap_err();
    assert!(matches!(err, FigError::Render(_)), "{err}");
    assert!(listing(&dir).is_empty());
}

#[test]
fn explicit_dpi_overrides_figure() {
    let dir = out_dir("dpi");
    let opts = SaveOptions::new().formats([ImageFormat::Png]).dpi(100).optipng(false);
    save_figures(&figure(), dir.join("out"), &opts).unwrap();
    let img = image::open(dir.join("out.png")).unwrap();
    assert_eq!((img.width(), img.height()), (300, 150));
}

#[cfg(unix)]
#[test]
fn failing_optimizer_is_reported() {
    let dir = out_dir("tool_fails");
    let opts = SaveOptions::new().formats([ImageFormat::Png]).optimizer(OptimizerConfig::new("false"));
    let err = save_figures(&figure(), dir.join("out"), &opts).unwrap_err();
    match err {
        FigError::ExternalToolFailure { program, path, .. } => {
            assert_eq!(program, "false");
            assert_eq!(path, dir.join("out.png"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // the unoptimized file is still there
    assert!(dir.join("out.png").exists());
}

#[cfg(unix)]
#[test]
fn succeeding_optimizer_keeps_valid_png() {
    let dir = out_dir("tool_ok");
    let opts = SaveOptions::new().formats([ImageFormat::Png]).optimizer(OptimizerConfig::new("true"));
    save_figures(&figure(), dir.join("out"), &opts).unwrap();
    assert!(image::open(dir.join("out.png")).is_ok());
}

#[cfg(unix)]
#[test]
fn optimizer_that_corrupts_output_is_reported() {
    let dir = out_dir("tool_corrupts");
    // `cp /dev/null <file>` truncates the PNG
    let opts = SaveOptions::new()
        .formats([ImageFormat::Png])
        .optimizer(OptimizerConfig::new("cp").arg("/dev/null"));
    let err = save_figures(&figure(), dir.join("out"), &opts).unwrap_err();
    assert!(matches!(err, FigError::ExternalToolFailure { ref reason, .. } if reason.contains("not a PNG")));
}
