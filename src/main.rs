//! Terminal Sokoban runner (default binary).
//!
//! Polls crossterm for keys with a short timeout, feeds the current time to
//! the engine every iteration, and redraws only when something changed.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, Level};

use tui_sokoban::core::{levels, Engine, EngineConfig, GameSnapshot};
use tui_sokoban::input::{handle_key_event, should_quit};
use tui_sokoban::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_sokoban::types::TICK_MS;

/// Sokoban on a wrap-around 8x16 board
#[derive(Parser, Debug)]
#[command(name = "tui-sokoban")]
#[command(version, about, long_about = None)]
struct Args {
    /// Level to start on
    #[arg(short, long, default_value_t = 1)]
    level: u8,

    /// Seed for the wall-hit messages
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Input poll interval in milliseconds
    #[arg(long, default_value_t = TICK_MS, value_parser = clap::value_parser!(u32).range(1..))]
    tick_ms: u32,

    /// Write logs to this file (the terminal is busy with the game)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Log level used with --log
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path, args.log_level)?;
    }

    let level = levels::level_id(args.level)?;
    let config = EngineConfig {
        seed: args.seed,
        ..EngineConfig::default()
    };
    let engine = Engine::with_config(level, Instant::now(), config)?;
    let poll = Duration::from_millis(args.tick_ms as u64);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, poll);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path, level: Level) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))
}

fn run(term: &mut TerminalRenderer, mut engine: Engine, poll: Duration) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut size = (0, 0);
    let mut dirty = true;

    loop {
        if !engine.tick(Instant::now()).is_empty() {
            dirty = true;
        }
        if engine.seconds_elapsed() != snap.seconds {
            dirty = true;
        }

        let current = crossterm::terminal::size().unwrap_or((80, 24));
        if current != size {
            size = current;
            term.invalidate();
            dirty = true;
        }

        if dirty {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(size.0, size.1), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if !event::poll(poll)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    info!(steps = engine.steps(), "quit");
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    engine.apply_action(action)?;
                    dirty = true;
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
