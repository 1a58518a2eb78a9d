//! Blinc Slider CLI
//!
//! Validate slide decks and play them in the terminal.

use anyhow::{Context, Result};
use blinc_slider::{ControlAction, Slider, SliderEvent};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod deck;
mod input;
mod terminal;

use deck::Deck;
use input::Command;
use terminal::TerminalSurface;

/// Longest the event loop sleeps when nothing is scheduled
const IDLE_WAIT: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "blinc-slider")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play Blinc slider decks in the terminal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a deck interactively
    Show {
        /// Deck file
        deck: PathBuf,

        /// Viewport width in columns
        #[arg(short, long, default_value = "60")]
        width: u16,
    },

    /// Validate a deck and print how it will start
    Check {
        /// Deck file
        deck: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Show { deck, width } => cmd_show(&deck, width),
        Commands::Check { deck } => cmd_check(&deck),
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let deck = Deck::load(path)?;
    let config = &deck.slider;

    println!("{}", path.display());
    println!("  slides:     {}", deck.slides.len());
    println!("  start:      {}", deck.start_index());
    println!(
        "  autoplay:   {}",
        if config.autoplay {
            format!("every {}ms", config.stop_time_ms)
        } else {
            "off".to_string()
        }
    );
    println!(
        "  movetime:   {}",
        if config.animates() {
            format!("{}ms", config.move_time_ms)
        } else {
            "instant".to_string()
        }
    );
    println!("  navigation: {}", on_off(config.navigation));
    println!("  pagination: {}", on_off(config.pagination));

    for (index, slide) in deck.slides.iter().enumerate() {
        if slide.title.trim().is_empty() {
            warn!("Slide {} has no title", index);
        }
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn cmd_show(path: &Path, width: u16) -> Result<()> {
    let deck = Deck::load(path)?;
    info!("Playing {} ({} slides)", path.display(), deck.slides.len());

    let surface = TerminalSurface::new(width);
    let mut slider = Slider::new(surface, deck.slides, deck.slider)?;

    let redraw = Arc::new(AtomicBool::new(true));
    {
        let redraw = Arc::clone(&redraw);
        slider.subscribe(move |event| {
            debug!(?event, "slider event");
            if !matches!(event, SliderEvent::Stalled { .. }) {
                redraw.store(true, Ordering::Relaxed);
            }
        });
    }
    slider.init();
    println!("{}", input::HELP);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        if redraw.swap(false, Ordering::Relaxed) {
            let mut out = io::stdout().lock();
            slider
                .surface()
                .render(
                    &mut out,
                    &slider.controls(),
                    slider.active_index(),
                    slider.slide_count(),
                )
                .context("Failed to draw slide")?;
        }

        let wait = next_wakeup(&slider)
            .map(|at| at.saturating_duration_since(Instant::now()))
            .map_or(IDLE_WAIT, |wait| wait.min(IDLE_WAIT));

        match rx.recv_timeout(wait) {
            Ok(line) => {
                let line = line.context("Failed to read stdin")?;
                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => run_command(&mut slider, command, &redraw),
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command, try `help`"),
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        let finished = slider.surface_mut().take_finished(Instant::now());
        if let Some(slot) = finished {
            slider.animation_finished(slot);
        }
        slider.tick().context("Slider stopped responding")?;
    }

    slider.destroy();
    Ok(())
}

fn next_wakeup(slider: &Slider<TerminalSurface>) -> Option<Instant> {
    match (slider.surface().deadline(), slider.next_autoplay_due()) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn run_command(slider: &mut Slider<TerminalSurface>, command: Command, redraw: &AtomicBool) {
    let outcome = match command {
        Command::Next => Some(slider.next()),
        Command::Prev => Some(slider.prev()),
        Command::GoTo(index) => Some(slider.go_to(index)),
        Command::Indicator(index) => Some(slider.activate(ControlAction::Indicator(index))),
        Command::Key(key) => {
            if !slider.handle_key(key) {
                println!("keyboard input is off");
            }
            None
        }
        Command::Autoplay => {
            slider.autoplay();
            None
        }
        Command::Stop => {
            slider.stop_autoplay();
            None
        }
        Command::Resize(columns) => {
            slider.surface_mut().set_columns(columns);
            if let Some(layout) = slider.on_resize() {
                debug!(?layout, "resized");
            }
            redraw.store(true, Ordering::Relaxed);
            None
        }
        Command::Help => {
            println!("{}", input::HELP);
            None
        }
        Command::Quit => None,
    };

    if let Some(outcome) = outcome {
        if !outcome.is_accepted() {
            debug!(?outcome, "move ignored");
        }
    }
}
