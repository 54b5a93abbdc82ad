// File: crates/figkit-core/tests/colormaps.rs
// Purpose: Registered palette colormaps and their use from panels.

use figkit_core::colormap;
use figkit_core::palette::{self, NamedColor};
use figkit_core::{subplots, FigError, MarkStyle, SubplotOptions};

#[test]
fn registry_names() {
    assert_eq!(
        colormap::names(),
        vec!["eri_colors", "eri_colors_r", "eri_red_blue", "eri_red_blue_r", "eri_red_cyan", "eri_red_cyan_r"]
    );
    assert!(colormap::get("viridis").is_none());
}

#[test]
fn reversed_maps_swap_ends() {
    let fwd = colormap::get("eri_red_blue").unwrap();
    let rev = colormap::get("eri_red_blue_r").unwrap();
    for t in [0.0, 0.25, 0.5, 1.0] {
        assert_eq!(fwd.color_at(t), rev.color_at(1.0 - t), "t={t}");
    }
    assert_eq!(colormap::red_blue().color_at(1.0), NamedColor::DarkBlue.color());
}

#[test]
fn rgba_is_unit_range() {
    let c = colormap::get("eri_red_cyan").unwrap();
    for t in [-1.0, 0.0, 0.3, 0.7, 1.0, 2.0] {
        let rgba = c.rgba(t);
        assert!(rgba.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(rgba[3], 1.0);
    }
}

#[test]
fn palette_lookup() {
    assert_eq!(NamedColor::MediumBlue.hex(), "#005E7B");
    assert_eq!("orange".parse::<NamedColor>().unwrap(), NamedColor::Orange);
    assert_eq!(palette::discrete().len(), 12);
    assert_eq!(palette::parse_hex("#D0073A").unwrap(), NamedColor::DarkRed.color());
}

#[test]
fn mapped_scatter_uses_registry() {
    let (_fig, panels) = subplots(&SubplotOptions::default()).unwrap();
    let p = panels.single().unwrap();
    p.scatter_mapped(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], "eri_red_cyan", MarkStyle::new()).unwrap();
    let err = p.scatter_mapped(&[0.0], &[0.0], &[0.0], "nope", MarkStyle::new()).unwrap_err();
    assert!(matches!(err, FigError::InvalidArgument(_)));
    assert_eq!(p.mark_count(), 1);
}
