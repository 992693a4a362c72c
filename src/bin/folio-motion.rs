use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_motion::{
    CarouselEngine, CommandLog, DurationMs, IntroChoreography, MotionConfig, Page, TimeMs,
    Viewport, oneshot,
};

#[derive(Parser, Debug)]
#[command(name = "folio-motion", version)]
struct Cli {
    /// Log filter, e.g. `debug` or `folio_motion=trace`.
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a page session on the virtual clock and print its events as JSON lines.
    Simulate(SimulateArgs),
    /// Print the materialized carousel cards for an active index.
    Carousel(CarouselArgs),
    /// Print one sampled intro frame.
    Intro(IntroArgs),
    /// Print the default configuration.
    Config,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Motion config JSON; defaults apply to every missing field.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop the session at this time (ms).
    #[arg(long, default_value_t = 10_000)]
    until: u64,

    /// Host tick interval (ms).
    #[arg(long, default_value_t = 16)]
    step: u64,

    /// Never start the intro, so no completion signal arrives.
    #[arg(long)]
    no_intro_signal: bool,

    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    #[arg(long, default_value_t = 900.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct CarouselArgs {
    /// Active index, counted in auto-advance steps from 0.
    #[arg(long, default_value_t = 0)]
    active: u32,

    /// Number of content items.
    #[arg(long, default_value_t = 6)]
    len: usize,

    /// Use the compact layout.
    #[arg(long)]
    mobile: bool,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct IntroArgs {
    /// Sample time (ms) after the intro starts.
    #[arg(long)]
    at: u64,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_new(&cli.log)
        .with_context(|| format!("parse log filter '{}'", cli.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Carousel(args) => cmd_carousel(args),
        Command::Intro(args) => cmd_intro(args),
        Command::Config => cmd_config(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MotionConfig> {
    let config = match path {
        Some(p) => MotionConfig::from_path(p)
            .with_context(|| format!("load motion config '{}'", p.display()))?,
        None => MotionConfig::default(),
    };
    config.validate().context("validate motion config")?;
    Ok(config)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0, "--step must be > 0");
    let config = load_config(args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height)?;
    let mut page = Page::new(config, viewport, CommandLog::new())?;

    if args.no_intro_signal {
        page.start_stalled(TimeMs::ZERO);
    } else {
        page.start(TimeMs::ZERO);
    }

    let mut t = 0;
    loop {
        t = (t + args.step).min(args.until);
        page.advance_to(TimeMs(t));
        for event in page.take_events() {
            let line = serde_json::json!({ "t": t, "event": event });
            println!("{line}");
        }
        if t >= args.until {
            break;
        }
    }

    let summary = serde_json::json!({
        "t": page.now(),
        "state": page.state(),
        "step": page.state().step(),
        "scroll_locked": page.is_scroll_locked(),
        "mounted": page.mounted(),
        "badge": page.badge().player().commands(),
    });
    println!("{summary}");
    Ok(())
}

fn cmd_carousel(args: CarouselArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let viewport = if args.mobile {
        Viewport::new(375.0, 812.0)?
    } else {
        Viewport::default()
    };
    let interval = config.carousel.interval;
    let mut engine = CarouselEngine::new(config.carousel, args.len, &viewport)?;
    engine.start(TimeMs::ZERO);
    engine.advance(TimeMs(interval.0 * u64::from(args.active)));

    let cards = engine.rendered();
    println!(
        "{}",
        serde_json::to_string_pretty(&cards).context("serialize carousel cards")?
    );
    Ok(())
}

fn cmd_intro(args: IntroArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let (notifier, _listener) = oneshot();
    let mut intro = IntroChoreography::new(config.intro, Viewport::default(), notifier)?;
    intro.start(TimeMs::ZERO);
    let at = TimeMs::ZERO.after(DurationMs(args.at));
    intro.advance(at);

    println!(
        "{}",
        serde_json::to_string_pretty(&intro.sample(at)).context("serialize intro frame")?
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", MotionConfig::default().to_json_pretty()?);
    Ok(())
}
