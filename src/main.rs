//! Terminal Animator CLI
//!
//! Usage:
//!   terminal-animator [OPTIONS] [PROFILE]
//!
//! Options:
//!   -f, --format <FORMAT>   svg, gif or all (default: all)
//!   -o, --out-dir <DIR>     Output directory (default: .)
//!   --svg-name <NAME>       SVG file name (default: terminal.svg)
//!   --gif-name <NAME>       GIF file name (default: terminal.gif)
//!   -c, --config <FILE>     Scene settings (TOML)
//!   -t, --theme <FILE>      Colour theme (TOML)
//!   --font <FILE>           Font file used to rasterize the GIF
//!   --embed-font <FILE>     Inline a font into the SVG
//!   --lint                  Report profile problems before rendering
//!   --timeline              Print the reveal timeline and exit
//!   -v, --verbose           Debug logging
//!   -h, --help              Print help

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use terminal_animator::renderer::EmbeddedFont;
use terminal_animator::{
    lint, render_gif, render_svg, Profile, RenderConfig, RenderError, SceneConfig, Theme,
    TerminalFont, Timeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Gif,
    All,
}

#[derive(Parser)]
#[command(name = "terminal-animator")]
#[command(about = "Render a profile file as an animated terminal session (SVG and GIF)")]
struct Cli {
    /// Profile file whose lines are revealed
    #[arg(default_value = "profile.yaml")]
    profile: PathBuf,

    /// Which outputs to produce
    #[arg(short, long, value_enum, default_value_t = Format::All)]
    format: Format,

    /// Directory the outputs are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// File name of the SVG output
    #[arg(long, default_value = "terminal.svg")]
    svg_name: String,

    /// File name of the GIF output
    #[arg(long, default_value = "terminal.gif")]
    gif_name: String,

    /// Scene settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour theme file (TOML)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Font file used to rasterize the GIF
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font file inlined into the SVG instead of the web font import
    #[arg(long)]
    embed_font: Option<PathBuf>,

    /// Report profile problems before rendering
    #[arg(long)]
    lint: bool,

    /// Print the reveal timeline and exit
    #[arg(long)]
    timeline: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("terminal_animator={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let profile = Profile::from_file(&cli.profile)?;
    let config = load_config(cli)?;

    if cli.timeline {
        print_timeline(&Timeline::for_scene(&profile, &config.scene));
        return Ok(());
    }

    if cli.lint {
        for warning in lint(&profile, &config) {
            warn!("{}: {}", warning.category, warning.message);
            eprint!("{}", warning.format(&profile.source, &profile.name));
        }
    }

    info!("Profile {}: {} lines", profile.name, profile.len());

    if matches!(cli.format, Format::Svg | Format::All) {
        let path = cli.out_dir.join(&cli.svg_name);
        let svg = render_svg(&profile, &config);
        fs::write(&path, svg).map_err(|e| RenderError::write(&path, e))?;
        let layout = config.resolved_svg_layout();
        println!(
            "Wrote {} ({}x{}px)",
            path.display(),
            layout.width,
            layout.height(profile.len())
        );
    }

    if matches!(cli.format, Format::Gif | Format::All) {
        let path = cli.out_dir.join(&cli.gif_name);
        let file = File::create(&path).map_err(|e| RenderError::write(&path, e))?;
        let mut writer = BufWriter::new(file);
        let summary = render_gif(&profile, &config, &mut writer)?;
        writer.flush().map_err(|e| RenderError::write(&path, e))?;
        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        println!(
            "Wrote {} ({}x{}px, {} frames, {:.1}s, {:.2} MB)",
            path.display(),
            summary.width,
            summary.height,
            summary.frames,
            summary.duration,
            size as f64 / (1024.0 * 1024.0)
        );
    }

    Ok(())
}

/// Layer CLI flags over the config file over defaults
fn load_config(cli: &Cli) -> Result<RenderConfig, RenderError> {
    let scene = match &cli.config {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };

    let mut config = RenderConfig::new();

    if let Some(path) = &cli.theme {
        config = config.with_theme(Theme::from_file(path)?);
    }
    if let Some(path) = &cli.font {
        config = config.with_font(TerminalFont::from_file(path, scene.font.gif_size)?);
    }
    if let Some(path) = &cli.embed_font {
        let svg = config.svg.clone().with_embedded_font(EmbeddedFont::from_file(path)?);
        config = config.with_svg(svg);
    }

    Ok(config.with_scene(scene))
}

fn print_timeline(tl: &Timeline) {
    println!("REVEAL TIMELINE");
    println!("===============");
    println!("command typed     {:>8.2}s", tl.command_end);
    println!("reveal starts     {:>8.2}s", tl.reveal_start);
    println!("reveal ends       {:>8.2}s  ({} lines)", tl.reveal_end, tl.line_count());
    println!("cursor stops      {:>8.2}s", tl.blink_end);
    println!("clear executes    {:>8.2}s", tl.clear_execute);
    println!("SVG loop          {:>8.2}s", tl.loop_time);
    println!("GIF duration      {:>8.2}s", tl.gif_duration);
}
