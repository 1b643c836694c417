use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Parser, ValueEnum};
use rainbow_roads::{
    ActivityFilter, ActivitySummary, ColorScheme, DEFAULT_COLOR_SCHEME, DEFAULT_FRAME_DELAY_MS,
    DEFAULT_LEVELS, FrameSink, GifSink, GifSinkOpts, PngSequenceSink, Region, RenderOpts,
    RenderThreading, load_activities, parse_date, parse_distance, parse_duration,
    render_activities, render_to_sink,
};

#[derive(Parser, Debug)]
#[command(name = "rainbow-roads", version, about = "Animate your exercise maps")]
struct Cli {
    /// Track files or directories to scan for `.json` tracks.
    #[arg(default_value = ".")]
    inputs: Vec<PathBuf>,

    /// Output GIF path, or output directory for a PNG sequence.
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Output format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of animation frames.
    #[arg(long, default_value_t = 100)]
    frames: u32,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// CSS linear-gradient inspired color scheme.
    #[arg(long, default_value = DEFAULT_COLOR_SCHEME)]
    colors: ColorScheme,

    /// Display time of each frame in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    frame_delay_ms: u32,

    /// Sports to include (repeatable, case-insensitive).
    #[arg(long = "sport")]
    sports: Vec<String>,

    /// Only activities starting on or after this date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    after: Option<DateTime<Utc>>,

    /// Only activities starting on or before this date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    before: Option<DateTime<Utc>>,

    /// Shortest activity duration, e.g. `15m`.
    #[arg(long, value_parser = parse_duration)]
    min_duration: Option<TimeDelta>,

    /// Longest activity duration, e.g. `1h30m`.
    #[arg(long, value_parser = parse_duration)]
    max_duration: Option<TimeDelta>,

    /// Shortest activity distance, e.g. `2km`.
    #[arg(long, value_parser = parse_distance)]
    min_distance: Option<f64>,

    /// Longest activity distance, e.g. `10mi`.
    #[arg(long, value_parser = parse_distance)]
    max_distance: Option<f64>,

    /// Region the activity must start in (`lat,lon,radius`).
    #[arg(long)]
    starts_near: Option<Region>,

    /// Region the activity must end in (`lat,lon,radius`).
    #[arg(long)]
    ends_near: Option<Region>,

    /// Region the activity must pass through (`lat,lon,radius`).
    #[arg(long)]
    passes_through: Option<Region>,

    /// Region the activity must stay inside (`lat,lon,radius`).
    #[arg(long)]
    bounded_by: Option<Region>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Log debug output.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Gif,
    Png,
}

impl Cli {
    fn filter(&self) -> ActivityFilter {
        ActivityFilter {
            sports: self.sports.clone(),
            after: self.after,
            before: self.before,
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            starts_near: self.starts_near,
            ends_near: self.ends_near,
            passes_through: self.passes_through,
            bounded_by: self.bounded_by,
        }
    }

    /// Resolve the output format and path.
    ///
    /// An existing directory means `<dir>/out`. A GIF path whose extension is not `gif` gets
    /// `.gif` appended; a PNG sequence uses the path as its directory.
    fn output(&self) -> (OutputFormat, PathBuf) {
        let base = if self.output.is_dir() && self.format != Some(OutputFormat::Png) {
            self.output.join("out")
        } else {
            self.output.clone()
        };
        let ext = base
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let format = self.format.unwrap_or(match ext.as_deref() {
            Some("png") => OutputFormat::Png,
            _ => OutputFormat::Gif,
        });
        match format {
            OutputFormat::Png => (format, base),
            OutputFormat::Gif if ext.as_deref() == Some("gif") => (format, base),
            OutputFormat::Gif => {
                let mut path = base.into_os_string();
                path.push(".gif");
                (format, PathBuf::from(path))
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let report = load_activities(&cli.inputs).context("load activities")?;
    if !report.warnings.is_empty() {
        tracing::warn!(
            skipped = report.warnings.len(),
            "some track files could not be read"
        );
    }
    let activities = cli.filter().apply(report.activities);
    let summary = ActivitySummary::from_activities(&activities)?;
    summary.log();

    let palette = cli.colors.palette(DEFAULT_LEVELS)?;
    let opts = RenderOpts {
        width: cli.width,
        frames: cli.frames,
        threading: RenderThreading {
            parallel: cli.parallel,
            threads: cli.threads,
        },
    };
    let seq = render_activities(&activities, &palette, &opts)?;

    let (format, out) = cli.output();
    let mut sink: Box<dyn FrameSink> = match format {
        OutputFormat::Gif => Box::new(GifSink::new(GifSinkOpts::new(&out))),
        OutputFormat::Png => Box::new(PngSequenceSink::new(&out)),
    };
    render_to_sink(&seq, sink.as_mut(), cli.frame_delay_ms)
        .with_context(|| format!("write '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
