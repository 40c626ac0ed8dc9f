//! mpro-screen
//!
//! Command-line tool for VoCore MPRO USB screens.
//!
//! # Usage
//!
//! ```bash
//! # List connected screens
//! mpro-screen list
//!
//! # Identify the first screen
//! mpro-screen info
//!
//! # Fill with a colour, show colour bars, blank
//! mpro-screen fill FF8000
//! mpro-screen pattern
//! mpro-screen clear
//!
//! # Draw one rectangle using a partial update
//! mpro-screen --partial rect 10 20 100 100 00FF00
//! ```

mod config;
mod pattern;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mpro_driver::{DamageRect, Device};
use mpro_hal_rusb::RusbTransport;

use config::{loader, Overrides};
use pattern::{parse_color, Canvas};

/// Drive a VoCore USB screen
#[derive(Parser)]
#[command(name = "mpro-screen")]
#[command(version)]
#[command(about = "Identify and draw on VoCore MPRO USB screens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to the built-in mpro.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Mirror the image horizontally
    #[arg(long, global = true)]
    flip_x: bool,

    /// Send only changed rectangles when the screen allows it
    #[arg(long, global = true)]
    partial: bool,

    /// Which connected screen to use
    #[arg(short, long, global = true)]
    index: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected screens
    List,

    /// Print screen identity and geometry
    Info,

    /// Fill the whole screen with one colour
    Fill {
        /// Colour as RRGGBB
        color: String,
    },

    /// Show colour bars
    Pattern,

    /// Blank the screen
    Clear,

    /// Draw a rectangle on a black background
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        /// Colour as RRGGBB
        color: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::List = cli.command {
        let screens = mpro_hal_rusb::list().context("failed to enumerate USB devices")?;
        if screens.is_empty() {
            println!("no screens connected");
        }
        for (i, screen) in screens.iter().enumerate() {
            println!("#{}: bus {:03} address {:03}", i, screen.bus, screen.address);
        }
        return Ok(());
    }

    let mut config = loader::load(cli.config.as_deref())?;
    config.apply(Overrides {
        flip_x: cli.flip_x,
        partial: cli.partial,
        index: cli.index,
    });

    let transport = RusbTransport::open_nth(config.device.index)
        .with_context(|| format!("cannot open screen #{}", config.device.index))?;
    let mut device = Device::attach(transport, &config.driver).context("attach failed")?;

    let panel = device.panel();
    let mut canvas = Canvas::new(panel.width, panel.height);
    let whole = panel.bounding_rect();

    match cli.command {
        Commands::List => {}
        Commands::Info => {
            println!("{}", device.info());
            println!("mode: {}", device.mode());
        }
        Commands::Fill { color } => {
            canvas.fill(parse_color(&color)?);
            device.update(&canvas.source()?, &[whole])?;
        }
        Commands::Pattern => {
            canvas.color_bars();
            device.update(&canvas.source()?, &[whole])?;
        }
        Commands::Clear => device.clear()?,
        Commands::Rect {
            x,
            y,
            width,
            height,
            color,
        } => {
            let rect = DamageRect::from_size(x, y, width, height);
            canvas.fill_rect(rect, parse_color(&color)?);
            device.update(&canvas.source()?, &[rect])?;
        }
    }

    device.detach();
    Ok(())
}
