use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::GrayImage;
use log::{info, warn};
use serde::Serialize;
use vision_threshold::comparison::{GLOBAL_TITLE, ORIGINAL_TITLE};
use vision_threshold::controls::{self, ParamRange};
use vision_threshold::explorer::{
    REJECTED_HISTOGRAM_TITLE, SELECTED_HISTOGRAM_TITLE, SOURCE_HISTOGRAM_TITLE,
};
use vision_threshold::{
    AdaptiveComparisonConfig, AdaptiveMethod, BinaryMask, DisplaySink, Explorer, GaussianBlur,
    GlobalThresholdConfig, Histogram, Image, ImageSource, ParameterChange, samples,
};

#[derive(Parser, Debug)]
#[command(name = "vt_gallery")]
#[command(about = "Run vision-threshold operations on images and write result panels")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "global")]
    Global(GlobalArgs),
    #[command(name = "adaptive")]
    Adaptive(AdaptiveArgs),
    #[command(name = "session")]
    Session(SessionArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SampleKind {
    Coins,
    Page,
    Checker,
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Image file to threshold; a synthetic sample is used when absent
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "coins")]
    sample: SampleKind,
    #[arg(long, default_value_t = 640)]
    sample_width: usize,
    #[arg(long, default_value_t = 480)]
    sample_height: usize,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 128)]
    threshold: u8,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    blur: f32,
}

#[derive(Args, Debug, Clone)]
struct AdaptiveArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 51)]
    window: usize,
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    offset: i32,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    blur: f32,
}

#[derive(Args, Debug, Clone)]
struct SessionArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// JSON array of parameter changes
    #[arg(long, required = true)]
    events: PathBuf,
    /// Render only the last change
    #[arg(long, default_value_t = false)]
    latest_only: bool,
}

/// Where the gallery reads its grayscale input from.
#[derive(Debug, Clone)]
enum GallerySource {
    File(PathBuf),
    Sample {
        kind: SampleKind,
        width: usize,
        height: usize,
    },
}

impl GallerySource {
    fn from_args(common: &CommonArgs) -> Self {
        match &common.input {
            Some(path) => Self::File(path.clone()),
            None => Self::Sample {
                kind: common.sample,
                width: common.sample_width,
                height: common.sample_height,
            },
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Sample { kind, .. } => format!("sample:{}", sample_name(*kind)),
        }
    }
}

impl ImageSource for GallerySource {
    type Error = anyhow::Error;

    fn load(&self) -> Result<Image<u8>> {
        match self {
            Self::File(path) => {
                ensure_file_exists(path, "input")?;
                load_input_u8(path)
            }
            Self::Sample {
                kind,
                width,
                height,
            } => {
                if *width == 0 || *height == 0 {
                    bail!("sample dimensions must be positive, got {width}x{height}.");
                }
                Ok(match kind {
                    SampleKind::Coins => samples::coins(*width, *height),
                    SampleKind::Page => samples::uneven_page(*width, *height),
                    SampleKind::Checker => samples::checkerboard(*width, *height, 32, 32, 220),
                })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct WrittenDto {
    title: String,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fraction: Option<f64>,
}

/// Writes every displayed item into a directory: images and masks as PNG
/// (masks rendered 0/255), histograms as `bin_start,count` CSV.
struct FileSink {
    root: PathBuf,
    dir: PathBuf,
    per_event: bool,
    events: usize,
    written: Vec<WrittenDto>,
}

impl FileSink {
    fn new(root: PathBuf, per_event: bool) -> Self {
        Self {
            dir: root.clone(),
            root,
            per_event,
            events: 0,
            written: Vec::new(),
        }
    }

    fn record(&mut self, title: &str, file: &Path, fraction: Option<f64>) {
        let rel = file.strip_prefix(&self.root).unwrap_or(file);
        info!("wrote {} ({title})", file.display());
        self.written.push(WrittenDto {
            title: title.to_string(),
            file: rel.display().to_string(),
            fraction,
        });
    }

    fn last_fraction(&self) -> Option<f64> {
        self.written.iter().rev().find_map(|w| w.fraction)
    }
}

impl DisplaySink for FileSink {
    type Error = anyhow::Error;

    fn begin(&mut self, change: &ParameterChange) -> Result<()> {
        if self.per_event {
            self.dir = self.root.join(format!("event_{:03}", self.events));
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("creating output directory {}", self.dir.display()))?;
        }
        info!("rendering {} change #{}", change.kind(), self.events);
        self.events += 1;
        Ok(())
    }

    fn show_image(&mut self, title: &str, image: &Image<u8>) -> Result<()> {
        let path = self.dir.join(format!("{}.png", file_stem(title)));
        save_u8_image(&path, image)?;
        self.record(title, &path, None);
        Ok(())
    }

    fn show_mask(&mut self, title: &str, mask: &BinaryMask) -> Result<()> {
        let path = self.dir.join(format!("{}.png", file_stem(title)));
        save_u8_image(&path, &mask.to_image(255))?;
        self.record(title, &path, Some(mask.fraction_set()));
        Ok(())
    }

    fn show_histogram(
        &mut self,
        title: &str,
        samples: &[u8],
        bins: usize,
        range: (f32, f32),
    ) -> Result<()> {
        let path = self.dir.join(format!("{}.csv", file_stem(title)));
        write_histogram_csv(&path, &Histogram::from_samples(samples, bins, range))?;
        self.record(title, &path, None);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct SourceDto {
    origin: String,
    width: usize,
    height: usize,
}

/// Interactive parameter ranges, recorded so a viewer can rebuild its sliders.
#[derive(Debug, Clone, Serialize)]
struct ControlsDto {
    threshold: ParamRange<u8>,
    blur_sigma: ParamRange<f32>,
    window_size: ParamRange<usize>,
    offset: ParamRange<i32>,
}

impl ControlsDto {
    fn current() -> Self {
        Self {
            threshold: controls::THRESHOLD,
            blur_sigma: controls::BLUR_SIGMA,
            window_size: controls::WINDOW_SIZE,
            offset: controls::OFFSET,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct MetaGlobal {
    source: SourceDto,
    threshold: u8,
    blur_sigma: f32,
    border: &'static str,
    rule: &'static str,
    fraction: Option<f64>,
    controls: ControlsDto,
    files: Vec<WrittenDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaAdaptive {
    source: SourceDto,
    window: usize,
    offset: i32,
    blur_sigma: f32,
    border: &'static str,
    rule: &'static str,
    controls: ControlsDto,
    files: Vec<WrittenDto>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSession {
    source: SourceDto,
    events_total: usize,
    latest_only: bool,
    rendered: Vec<ParameterChange>,
    controls: ControlsDto,
    files: Vec<WrittenDto>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Global(args) => run_global_case(args),
        Command::Adaptive(args) => run_adaptive_case(args),
        Command::Session(args) => run_session(args),
    }
}

fn run_global_case(args: GlobalArgs) -> Result<()> {
    let blur = GaussianBlur::new(args.blur).context("invalid --blur")?;
    let cfg = GlobalThresholdConfig {
        threshold: args.threshold,
        blur,
    };

    let (case_dir, explorer, source) = prepare_case(&args.common, "global")?;
    let mut sink = FileSink::new(case_dir.clone(), false);
    explorer.show_source(&mut sink)?;
    explorer.handle(&ParameterChange::Global(cfg), &mut sink)?;

    let fraction = sink.last_fraction();
    if let Some(f) = fraction {
        info!("threshold {} selected {:.2}% of pixels", cfg.threshold, f * 100.0);
    }

    write_json(
        case_dir.join("meta.json"),
        &MetaGlobal {
            source,
            threshold: cfg.threshold,
            blur_sigma: blur.sigma(),
            border: blur.border().name(),
            rule: "selected iff pixel > threshold",
            fraction,
            controls: ControlsDto::current(),
            files: sink.written,
        },
    )
}

fn run_adaptive_case(args: AdaptiveArgs) -> Result<()> {
    let cfg = AdaptiveComparisonConfig::new(args.window, args.offset, args.blur)
        .context("invalid adaptive parameters")?;

    let (case_dir, explorer, source) = prepare_case(&args.common, "adaptive")?;
    let mut sink = FileSink::new(case_dir.clone(), false);
    explorer.show_source(&mut sink)?;
    explorer.handle(&ParameterChange::Adaptive(cfg), &mut sink)?;

    write_json(
        case_dir.join("meta.json"),
        &MetaAdaptive {
            source,
            window: cfg.window.get(),
            offset: cfg.offset,
            blur_sigma: cfg.blur.sigma(),
            border: cfg.blur.border().name(),
            rule: "selected iff pixel > round(local mean) - offset",
            controls: ControlsDto::current(),
            files: sink.written,
        },
    )
}

fn run_session(args: SessionArgs) -> Result<()> {
    ensure_file_exists(&args.events, "events")?;
    let changes: Vec<ParameterChange> = read_json(&args.events)
        .with_context(|| format!("reading parameter changes at {}", args.events.display()))?;
    if changes.is_empty() {
        warn!("{} contains no parameter changes", args.events.display());
    }

    let (case_dir, explorer, source) = prepare_case(&args.common, "session")?;
    let mut sink = FileSink::new(case_dir.clone(), true);
    explorer.show_source(&mut sink)?;

    let events_total = changes.len();
    let rendered = if args.latest_only {
        explorer
            .handle_latest(changes, &mut sink)?
            .into_iter()
            .collect()
    } else {
        for change in &changes {
            explorer.handle(change, &mut sink)?;
        }
        changes
    };
    info!("rendered {} of {events_total} parameter changes", rendered.len());

    write_json(
        case_dir.join("meta.json"),
        &MetaSession {
            source,
            events_total,
            latest_only: args.latest_only,
            rendered,
            controls: ControlsDto::current(),
            files: sink.written,
        },
    )
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<(PathBuf, Explorer, SourceDto)> {
    let source = GallerySource::from_args(common);
    let explorer = Explorer::from_source(&source)
        .with_context(|| format!("loading {}", source.describe()))?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    let img = explorer.source();
    info!(
        "{case_name}: {} ({}x{}) -> {}",
        source.describe(),
        img.width(),
        img.height(),
        case_dir.display()
    );

    let dto = SourceDto {
        origin: source.describe(),
        width: img.width(),
        height: img.height(),
    };
    Ok((case_dir, explorer, dto))
}

fn sample_name(kind: SampleKind) -> &'static str {
    match kind {
        SampleKind::Coins => "coins",
        SampleKind::Page => "page",
        SampleKind::Checker => "checker",
    }
}

/// Output file stem for a display title.
fn file_stem(title: &str) -> String {
    let fixed = match title {
        ORIGINAL_TITLE => Some("input"),
        GLOBAL_TITLE => Some("global"),
        SOURCE_HISTOGRAM_TITLE => Some("histogram"),
        SELECTED_HISTOGRAM_TITLE => Some("histogram_selected"),
        REJECTED_HISTOGRAM_TITLE => Some("histogram_rejected"),
        t if t == AdaptiveMethod::Mean.title() => Some("adaptive_mean"),
        t if t == AdaptiveMethod::Gaussian.title() => Some("adaptive_gaussian"),
        t if t.starts_with("Threshold (") => Some("mask"),
        t if t.starts_with("Image (") => Some("source"),
        _ => None,
    };
    if let Some(stem) = fixed {
        return stem.to_string();
    }

    let mut stem = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let trimmed = stem.trim_end_matches('_');
    if trimmed.is_empty() {
        "panel".to_string()
    } else {
        trimmed.to_string()
    }
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing grayscale image from {}", path.display()))
}

fn save_u8_image(path: &Path, img: &Image<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn write_histogram_csv(path: &Path, hist: &Histogram) -> Result<()> {
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "bin_start,count").context("writing csv header")?;
    for (i, count) in hist.counts().iter().enumerate() {
        writeln!(file, "{},{count}", hist.bin_start(i)).context("writing csv row")?;
    }
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ControlsDto, file_stem};

    #[test]
    fn meta_records_slider_ranges() {
        let json = serde_json::to_value(ControlsDto::current()).expect("serialize controls");
        assert_eq!(json["threshold"]["max"], 255);
        assert_eq!(json["threshold"]["default"], 128);
        assert_eq!(json["window_size"]["step"], 2);
        assert_eq!(json["window_size"]["default"], 51);
        assert_eq!(json["offset"]["min"], -50);
    }

    #[test]
    fn known_titles_map_to_fixed_stems() {
        assert_eq!(file_stem("Original Image"), "input");
        assert_eq!(file_stem("Global Thresholding (q = 127)"), "global");
        assert_eq!(file_stem("Adaptive Mean Thresholding"), "adaptive_mean");
        assert_eq!(file_stem("Adaptive Gaussian Thresholding"), "adaptive_gaussian");
        assert_eq!(file_stem("Threshold (12.50% pixels selected)"), "mask");
        assert_eq!(file_stem("Image (640, 480)"), "source");
        assert_eq!(file_stem("Selected pixels"), "histogram_selected");
    }

    #[test]
    fn other_titles_are_slugged() {
        assert_eq!(file_stem("Otsu (auto)"), "otsu_auto");
        assert_eq!(file_stem("  "), "panel");
    }
}
