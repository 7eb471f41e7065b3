use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use vortex_splash::{
    CpuSurface, DrawOp, FontSet, MIN_FRAME_INTERVAL_MS, Mount, Outcome, Phase, PlaybackStats,
    RecordingSurface, Rgba8, SimCounters, SimEvent, SimHost, Size, Splash, SplashConfig,
    SplashError,
};

#[derive(Parser, Debug)]
#[command(name = "vortex-splash", version)]
struct Cli {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the splash on virtual time and print a JSON report.
    Simulate(SimulateArgs),
    /// Render the splash as it looks at a given time to a PNG.
    Frame(FrameArgs),
    /// Render every delivered frame to a numbered PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct PlaybackArgs {
    /// Config JSON; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the playback duration in milliseconds.
    #[arg(long)]
    duration_ms: Option<f64>,

    /// Override the random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Virtual milliseconds between delivered frames, at least 1.
    #[arg(long, default_value_t = 16.0, value_parser = parse_frame_interval)]
    frame_interval: f64,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    playback: PlaybackArgs,

    /// Stop delivering frames after this many virtual milliseconds.
    #[arg(long)]
    stall_after: Option<f64>,

    /// Simulate a host with no frame scheduling at all.
    #[arg(long)]
    no_frames: bool,

    /// Tear the playback down at this virtual time.
    #[arg(long)]
    teardown_at: Option<f64>,

    /// Include the draw ops of the last rendered frame.
    #[arg(long)]
    dump_ops: bool,
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Font file used for both particles and the wordmark.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font file for particle labels; overrides `--font`.
    #[arg(long)]
    particle_font: Option<PathBuf>,

    /// Font file for the wordmark; overrides `--font`.
    #[arg(long)]
    wordmark_font: Option<PathBuf>,

    /// Background color as `#rrggbb` or `#rrggbbaa`.
    #[arg(long, default_value = "#12141c")]
    background: String,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    playback: PlaybackArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Virtual time to capture, in milliseconds since mount.
    #[arg(long)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    playback: PlaybackArgs,

    #[command(flatten)]
    fonts: FontArgs,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_config(args: &PlaybackArgs) -> anyhow::Result<SplashConfig> {
    let mut cfg = match &args.config {
        Some(path) => SplashConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SplashConfig::default(),
    };
    if let Some(ms) = args.duration_ms {
        cfg = cfg.with_duration_ms(ms);
    }
    if let Some(seed) = args.seed {
        cfg = cfg.with_seed(seed);
    }
    cfg.validate()?;
    Ok(cfg)
}

fn parse_frame_interval(s: &str) -> Result<f64, String> {
    let ms: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !ms.is_finite() || ms < MIN_FRAME_INTERVAL_MS {
        return Err(format!("must be a finite number >= {MIN_FRAME_INTERVAL_MS}, got {s}"));
    }
    Ok(ms)
}

fn viewport(args: &PlaybackArgs) -> anyhow::Result<Size> {
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("viewport must be non-empty, got {}x{}", args.width, args.height);
    }
    Ok(Size::new(f64::from(args.width), f64::from(args.height)))
}

#[derive(serde::Serialize)]
struct PhaseChange {
    at_ms: f64,
    phase: Phase,
}

#[derive(serde::Serialize)]
struct SimulateReport {
    duration_ms: f64,
    watchdog_ms: f64,
    particles: usize,
    phases: Vec<PhaseChange>,
    events: usize,
    completions: u32,
    completed_at_ms: Option<f64>,
    outcome: Option<Outcome>,
    caption: &'static str,
    progress: f64,
    stats: PlaybackStats,
    host: SimCounters,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_frame: Option<Vec<DrawOp>>,
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.playback)?;
    let size = viewport(&args.playback)?;
    let mut host = SimHost::recording(size).with_frame_interval(args.playback.frame_interval);
    if let Some(at) = args.stall_after {
        host = host.stall_frames_after(at);
    }
    if args.no_frames {
        host = host.without_frames();
    }

    let clock = host.clock();
    let phases = Rc::new(RefCell::new(Vec::new()));
    let completions = Rc::new(Cell::new(0u32));
    let completed_at = Rc::new(Cell::new(None));

    let mount = {
        let clock = clock.clone();
        let phases = phases.clone();
        let mount = Mount::new(cfg.clone()).with_phase_observer(move |phase| {
            phases.borrow_mut().push(PhaseChange {
                at_ms: clock.now_ms(),
                phase,
            });
        });
        // Owned surfaces go back to the host on completion; keep ours to dump it.
        if args.dump_ops {
            mount.with_surface(RecordingSurface::new(size))
        } else {
            mount
        }
    };
    let on_complete = {
        let completions = completions.clone();
        let completed_at = completed_at.clone();
        move || {
            completions.set(completions.get() + 1);
            completed_at.set(Some(clock.now_ms()));
        }
    };

    let mut splash = Splash::mount(&mut host, mount, on_complete);
    let horizon = cfg.watchdog_ms() + cfg.duration_ms;
    let mut events = 0;
    if let Some(at) = args.teardown_at {
        events += host.drive(&mut splash, at, |_, _, _| {});
        host.advance_to(at);
        splash.teardown(&mut host);
    }
    events += host.drive(&mut splash, horizon, |_, _, _| {});

    let report = SimulateReport {
        duration_ms: cfg.duration_ms,
        watchdog_ms: cfg.watchdog_ms(),
        particles: splash.field().particles().len(),
        phases: phases.take(),
        events,
        completions: completions.get(),
        completed_at_ms: completed_at.get(),
        outcome: splash.outcome(),
        caption: splash.caption(),
        progress: splash.progress(),
        stats: splash.stats(),
        host: host.counters(),
        last_frame: splash
            .take_surface()
            .map(|surface| surface.ops().to_vec()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_font(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))
}

fn load_fonts(args: &FontArgs) -> anyhow::Result<FontSet> {
    let shared = args.font.as_deref().map(read_font).transpose()?;
    let particle = match &args.particle_font {
        Some(p) => Some(read_font(p)?),
        None => shared.clone(),
    };
    let wordmark = match &args.wordmark_font {
        Some(p) => Some(read_font(p)?),
        None => shared,
    };
    if particle.is_none() && wordmark.is_none() {
        anyhow::bail!("no fonts given; pass --font or --particle-font/--wordmark-font");
    }

    let mut fonts = FontSet::new();
    if let Some(bytes) = particle {
        fonts = fonts.with_particle(bytes);
    }
    if let Some(bytes) = wordmark {
        fonts = fonts.with_wordmark(bytes);
    }
    Ok(fonts)
}

/// A host drawing onto one CPU surface the caller owns, so frames stay readable after completion.
fn cpu_playback(
    playback: &PlaybackArgs,
    fonts: &FontArgs,
) -> anyhow::Result<(SimHost<CpuSurface>, Splash<SimHost<CpuSurface>>)> {
    let cfg = load_config(playback)?;
    let size = viewport(playback)?;
    let background = Rgba8::parse_hex(&fonts.background)?;
    let surface = CpuSurface::new(size, &load_fonts(fonts)?)?.with_background(Some(background));

    let mut host = SimHost::<CpuSurface>::with_factory(size, |_| {
        Err(SplashError::surface("playback draws on a caller-owned surface"))
    })
    .with_frame_interval(playback.frame_interval);
    let splash = Splash::mount(&mut host, Mount::new(cfg).with_surface(surface), || {});
    Ok((host, splash))
}

fn write_png(splash: &mut Splash<SimHost<CpuSurface>>, out: &Path) -> anyhow::Result<()> {
    let surface = splash
        .surface_mut()
        .context("playback has no surface to read back")?;
    let frame = surface.snapshot()?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut host, mut splash) = cpu_playback(&args.playback, &args.fonts)?;
    host.drive(&mut splash, args.at_ms, |_, _, _| {});
    write_png(&mut splash, &args.out)?;

    eprintln!(
        "wrote {} (progress {:.3}, {})",
        args.out.display(),
        splash.progress(),
        splash.caption()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut host, mut splash) = cpu_playback(&args.playback, &args.fonts)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let horizon = splash.config().watchdog_ms();
    let mut written = 0usize;
    while let Some(event) = host.next_event(horizon) {
        match event {
            SimEvent::Frame(req) => {
                splash.on_frame(&mut host, req);
                let out = args.out_dir.join(format!("frame_{written:05}.png"));
                write_png(&mut splash, &out)?;
                written += 1;
            }
            SimEvent::Timeout(id) => splash.on_timeout(&mut host, id),
            SimEvent::Resize(_) => splash.on_resize(&mut host),
        }
        if !splash.is_live() {
            break;
        }
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}
