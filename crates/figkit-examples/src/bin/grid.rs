// File: crates/figkit-examples/src/bin/grid.rs
// Summary: Minimal example that styles, lays out and exports a 2x2 figure.

use figkit_core::style::build_named;
use figkit_core::{alpha, save_figures, style_context, subplots, MarkStyle, SaveOptions, Shift, SubplotOptions};

fn main() {
    let profile = build_named("document").expect("document profile");
    let _style = style_context(&profile);

    let opts = SubplotOptions::new(2, 2).aspect(1.4).shift(Shift::Auto);
    let (mut fig, panels) = subplots(&opts).expect("subplots");
    fig.set_suptitle("Example grid");

    let xs: Vec<f64> = (0..60).map(|i| i as f64 / 10.0).collect();
    let layers = 4;
    let a = alpha(layers, 0.85).expect("alpha");
    for (k, p) in panels.iter().enumerate() {
        for j in 0..layers {
            let ys: Vec<f64> = xs.iter().map(|x| (x + j as f64 * 0.4).sin() + k as f64).collect();
            p.plot_with(&xs, &ys, MarkStyle::new().alpha(a)).expect("plot");
        }
        p.set_title(format!("Panel {}", k + 1));
        p.set_xlabel("time");
        p.set_ylabel("value");
    }

    let out = std::path::PathBuf::from("target/out/example_grid");
    let written = save_figures(&fig, &out, &SaveOptions::default()).expect("save figures");
    for path in written {
        println!("Wrote {}", path.display());
    }
}
