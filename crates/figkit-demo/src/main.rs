// File: crates/figkit-demo/src/main.rs
// Summary: Demo loads a CSV, draws every numeric column in its own panel of a styled grid, and exports it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use figkit_core::{
    build_style, save_figures, style_context, subplots, ImageFormat, MarkStyle, OptimizerConfig, Profile,
    SaveOptions, Shift, StyleOptions, SubplotOptions,
};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "figkit-demo")]
#[command(about = "Plot each numeric CSV column in its own panel and export the figure")]
struct Cli {
    /// Input CSV file with a header row
    input: PathBuf,
    /// Output basename (extension optional); defaults to target/out/<input stem>
    #[arg(long, short)]
    out: Option<PathBuf>,
    /// Style profile: document or presentation
    #[arg(long, default_value = "document")]
    profile: Profile,
    /// Override the profile's base font size (points)
    #[arg(long)]
    base_size: Option<f64>,
    /// Panels per row
    #[arg(long, default_value_t = 2)]
    cols: usize,
    /// Per-panel width / height
    #[arg(long)]
    aspect: Option<f64>,
    /// Export formats (repeatable or comma-separated), e.g. png,pdf,svg
    #[arg(long, value_delimiter = ',')]
    format: Vec<ImageFormat>,
    /// Raster DPI; the profile's DPI when omitted
    #[arg(long)]
    dpi: Option<u32>,
    /// Skip lossless PNG optimization
    #[arg(long)]
    no_optipng: bool,
    /// PNG optimizer program
    #[arg(long, default_value = "optipng")]
    optimizer: String,
    /// Log verbosity level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Numeric columns of a CSV plus the x values they share.
struct Table {
    x_label: String,
    xs: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false)
        .init();

    let (path, used_alt) = resolve_path(&cli.input)?;
    info!("Using input file: {}", path.display());
    if used_alt {
        info!("  (extension swapped between .csv/.cvs)");
    }

    let table = load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if table.columns.is_empty() {
        anyhow::bail!("no numeric columns found in {} - check headers/delimiter.", path.display());
    }
    info!("Loaded {} rows x {} numeric columns", table.xs.len(), table.columns.len());

    let mut style_opts = StyleOptions::new().profile(cli.profile);
    if let Some(size) = cli.base_size {
        style_opts = style_opts.base_size(size);
    }
    let profile = build_style(&style_opts).context("building style profile")?;
    let _style = style_context(&profile);

    let n = table.columns.len();
    let cols = cli.cols.clamp(1, n);
    let rows = n.div_ceil(cols);
    let mut grid = SubplotOptions::new(rows, cols).flatten(true).shift(Shift::Auto);
    if let Some(a) = cli.aspect {
        grid = grid.aspect(a);
    }
    let (mut fig, panels) = subplots(&grid).context("creating subplot grid")?;
    fig.set_suptitle(path.file_stem().and_then(|s| s.to_str()).unwrap_or("data"));

    for (i, (panel, (name, ys))) in panels.iter().zip(&table.columns).enumerate() {
        panel
            .plot_with(&table.xs, ys, MarkStyle::new().label(name.clone()))
            .with_context(|| format!("plotting column '{name}'"))?;
        panel.set_title(name.clone());
        panel.set_xlabel(table.x_label.clone());
        debug!("panel {i}: column '{name}' ({} points)", ys.len());
    }
    if panels.len() > n {
        debug!("{} panel(s) left empty", panels.len() - n);
    }

    let mut save = SaveOptions::new()
        .optipng(!cli.no_optipng)
        .optimizer(OptimizerConfig::new(cli.optimizer));
    if !cli.format.is_empty() {
        save = save.formats(cli.format);
    }
    if let Some(dpi) = cli.dpi {
        save = save.dpi(dpi);
    }
    let out = cli.out.unwrap_or_else(|| default_out(&path));
    let written = save_figures(&fig, &out, &save).with_context(|| format!("exporting to {}", out.display()))?;
    for p in written {
        info!("Wrote {}", p.display());
    }
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(p: &Path) -> Result<(PathBuf, bool)> {
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Output basename like target/out/figure_<stem>
fn default_out(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("data");
    PathBuf::from("target/out").join(format!("figure_{stem}"))
}

fn load_csv(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect::<Vec<_>>();
    debug!("Headers: {:?}", headers);

    let i_x = headers
        .iter()
        .position(|h| ["time", "timestamp", "open_time", "date", "datetime", "x", "index"].contains(&h.to_lowercase().as_str()));

    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
    let parse = |s: Option<&str>| s.and_then(|s| s.trim().parse::<f64>().ok());

    let xs: Vec<f64> = match i_x {
        Some(ix) => records
            .iter()
            .enumerate()
            .map(|(row, rec)| rec.get(ix).and_then(parse_time_to_f64).unwrap_or(row as f64))
            .collect(),
        None => (0..records.len()).map(|row| row as f64).collect(),
    };

    let mut columns = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        if Some(i) == i_x {
            continue;
        }
        let ys: Vec<f64> = records.iter().map(|rec| parse(rec.get(i)).unwrap_or(f64::NAN)).collect();
        let numeric = ys.iter().filter(|v| v.is_finite()).count();
        if numeric == 0 {
            warn!("skipping non-numeric column '{name}'");
            continue;
        }
        columns.push((name.clone(), ys));
    }

    let x_label = i_x.map(|i| headers[i].clone()).unwrap_or_else(|| "row".to_string());
    Ok(Table { x_label, xs, columns })
}

fn parse_time_to_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return Some(n as f64 / 1000.0);
        } // epoch ms -> sec
        return Some(n as f64);
    }
    s.parse::<f64>().ok()
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}
