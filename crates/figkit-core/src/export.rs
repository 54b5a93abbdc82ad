// File: crates/figkit-core/src/export.rs
// Summary: Multi-format figure export with optional lossless PNG optimization by an external tool.
// Notes:
// - Every requested format is validated before the first file is written.
// - A missing optimizer is the one failure that is skipped silently.

use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use crate::error::{FigError, Result};
use crate::figure::Figure;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Pdf,
    Svg,
    Tiff,
    Webp,
    Jpeg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 6] =
        [ImageFormat::Png, ImageFormat::Pdf, ImageFormat::Svg, ImageFormat::Tiff, ImageFormat::Webp, ImageFormat::Jpeg];

    /// File extension written for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Svg => "svg",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Webp => "webp",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match norm.as_str() {
            "png" => Ok(ImageFormat::Png),
            "pdf" => Ok(ImageFormat::Pdf),
            "svg" => Ok(ImageFormat::Svg),
            "tif" | "tiff" => Ok(ImageFormat::Tiff),
            "webp" => Ok(ImageFormat::Webp),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            _ => Err(FigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// External program run on written PNG files as `program [args..] <file>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizerConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { program: "optipng".to_string(), args: Vec::new() }
    }
}

impl OptimizerConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaveOptions {
    /// Formats to write; `None` means png and pdf (plus the basename's own suffix, if recognized).
    pub formats: Option<Vec<ImageFormat>>,
    /// Raster DPI; the figure's DPI when `None`.
    pub dpi: Option<u32>,
    /// Run the optimizer on the PNG output.
    pub optipng: bool,
    pub optimizer: OptimizerConfig,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { formats: None, dpi: None, optipng: true, optimizer: OptimizerConfig::default() }
    }
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formats(mut self, formats: impl IntoIterator<Item = ImageFormat>) -> Self {
        self.formats = Some(formats.into_iter().collect());
        self
    }

    /// Parse and set formats by name; fails on the first unsupported one.
    pub fn format_names<S: AsRef<str>>(self, names: &[S]) -> Result<Self> {
        let parsed = names.iter().map(|n| n.as_ref().parse()).collect::<Result<Vec<ImageFormat>>>()?;
        Ok(self.formats(parsed))
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn optipng(mut self, on: bool) -> Self {
        self.optipng = on;
        self
    }

    pub fn optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }
}

/// Split a recognized format suffix off `basename`. Unknown suffixes stay.
fn split_basename(basename: &Path) -> (PathBuf, Option<ImageFormat>) {
    match basename.extension().and_then(|e| e.to_str()).and_then(|e| e.parse::<ImageFormat>().ok()) {
        Some(fmt) => (basename.with_extension(""), Some(fmt)),
        None => (basename.to_path_buf(), None),
    }
}

/// `{stem}.{ext}` without touching any dot already in the stem.
fn output_path(stem: &Path, format: ImageFormat) -> PathBuf {
    let mut s = OsString::from(stem.as_os_str());
    s.push(".");
    s.push(format.extension());
    PathBuf::from(s)
}

fn resolve_formats(requested: Option<&[ImageFormat]>, suffix: Option<ImageFormat>) -> Result<Vec<ImageFormat>> {
    let mut list: Vec<ImageFormat> = match requested {
        Some([]) => return Err(FigError::InvalidArgument("no export formats requested".into())),
        Some(fs) => fs.to_vec(),
        None => {
            let mut v = vec![ImageFormat::Png, ImageFormat::Pdf];
            v.extend(suffix);
            v
        }
    };
    let mut seen = Vec::with_capacity(list.len());
    list.retain(|f| {
        let first = !seen.contains(f);
        seen.push(*f);
        first
    });
    Ok(list)
}

/// Write `fig` once per requested format as `{basename}.{ext}`.
///
/// Returns the written paths in format order. Every format is encoded
/// before the first file is written. The parent directory is created if
/// needed. When a PNG is written and `opts.optipng` is set, the
/// optimizer runs on it; if the program is not installed that step is
/// skipped, any other failure is returned.
pub fn save_figures(fig: &Figure, basename: impl AsRef<Path>, opts: &SaveOptions) -> Result<Vec<PathBuf>> {
    let basename = basename.as_ref();
    if basename.as_os_str().is_empty() {
        return Err(FigError::InvalidArgument("basename must not be empty".into()));
    }
    let (stem, suffix) = split_basename(basename);
    let formats = resolve_formats(opts.formats.as_deref(), suffix)?;
    let dpi = opts.dpi.unwrap_or(fig.dpi());
    if dpi == 0 {
        return Err(FigError::InvalidArgument("dpi must be positive".into()));
    }

    if let Some(parent) = stem.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(FigError::io(parent))?;
    }

    // Encode everything before writing so an encoder failure leaves no files behind.
    let encoded = formats
        .into_iter()
        .map(|format| fig.encode(format, dpi).map(|bytes| (format, bytes)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(encoded.len());
    let mut png = None;
    for (format, bytes) in encoded {
        let path = output_path(&stem, format);
        std::fs::write(&path, &bytes).map_err(FigError::io(&path))?;
        log::debug!("wrote {} ({} bytes, {} dpi)", path.display(), bytes.len(), dpi);
        if format == ImageFormat::Png {
            png = Some(path.clone());
        }
        written.push(path);
    }

    if let (Some(path), true) = (png, opts.optipng) {
        optimize_png(&path, &opts.optimizer)?;
    }
    Ok(written)
}

/// [`save_figures`] with formats given by name, all parsed before anything is written.
pub fn save_figures_as<S: AsRef<str>>(fig: &Figure, basename: impl AsRef<Path>, formats: &[S]) -> Result<Vec<PathBuf>> {
    let opts = SaveOptions::new().format_names(formats)?;
    save_figures(fig, basename, &opts)
}

/// Run the optimizer on `path`. Returns `false` when the program is not installed.
pub fn optimize_png(path: &Path, cfg: &OptimizerConfig) -> Result<bool> {
    let failure = |reason: String| FigError::ExternalToolFailure {
        program: cfg.program.clone(),
        path: path.to_path_buf(),
        reason,
    };
    let output = match Command::new(&cfg.program).args(&cfg.args).arg(path).output() {
        Ok(out) => out,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} not found; leaving {} unoptimized", cfg.program, path.display());
            return Ok(false);
        }
        Err(e) => return Err(failure(format!("could not start: {e}"))),
    };
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(failure(format!("{} ({})", output.status, stderr.trim())));
    }
    let optimized = std::fs::read(path).map_err(FigError::io(path))?;
    if !optimized.starts_with(&PNG_SIGNATURE) {
        return Err(failure("output is not a PNG file".into()));
    }
    log::info!("optimized {} with {} ({} bytes)", path.display(), cfg.program, optimized.len());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse() {
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!(".tif".parse::<ImageFormat>().unwrap(), ImageFormat::Tiff);
        assert_eq!("jpeg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        for bad in ["eps", "svgz_bogus", ""] {
            assert!(matches!(bad.parse::<ImageFormat>(), Err(FigError::UnsupportedFormat(_))));
        }
    }

    #[test]
    fn recognized_suffix_is_split_off() {
        assert_eq!(split_basename(Path::new("out/fig.png")), (PathBuf::from("out/fig"), Some(ImageFormat::Png)));
        assert_eq!(split_basename(Path::new("fig.v2")), (PathBuf::from("fig.v2"), None));
        assert_eq!(output_path(Path::new("fig.v2"), ImageFormat::Pdf), PathBuf::from("fig.v2.pdf"));
    }

    #[test]
    fn defaults_add_suffix_format_once() {
        let f = resolve_formats(None, Some(ImageFormat::Svg)).unwrap();
        assert_eq!(f, vec![ImageFormat::Png, ImageFormat::Pdf, ImageFormat::Svg]);
        let f = resolve_formats(None, Some(ImageFormat::Png)).unwrap();
        assert_eq!(f, vec![ImageFormat::Png, ImageFormat::Pdf]);
        let f = resolve_formats(Some(&[ImageFormat::Pdf, ImageFormat::Pdf]), Some(ImageFormat::Png)).unwrap();
        assert_eq!(f, vec![ImageFormat::Pdf]);
        assert!(resolve_formats(Some(&[]), None).is_err());
    }
}
