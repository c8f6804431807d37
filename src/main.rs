//! Terminal runner (default binary).
//!
//! Wires the gameplay core to crossterm input, the framebuffer renderer, and
//! the settings file. The loop runs at a fixed tick; input is polled between
//! ticks and applied immediately.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use block_stack::core::{GameConfig, GameSnapshot, GameState};
use block_stack::input::{handle_key_event, should_quit, CONTROLS_HINT};
use block_stack::settings::{Settings, SettingsStore};
use block_stack::term::{FrameBuffer, GameView, Palette, TerminalRenderer, Viewport};
use block_stack::types::{GameEvent, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "block-stack", version, about = "Falling-block puzzle in the terminal")]
struct Cli {
    #[arg(long, help = "Seed for the piece randomizer (random when omitted)")]
    seed: Option<u32>,

    #[arg(long, default_value_t = BOARD_WIDTH, help = "Board width in cells")]
    width: u8,

    #[arg(long, default_value_t = BOARD_HEIGHT, help = "Board height in cells")]
    height: u8,

    #[arg(long, help = "Settings file (default: $HOME/.block-stack/settings.json)")]
    settings: Option<PathBuf>,

    #[arg(long, help = "Skip the ready countdown after start and resume")]
    no_countdown: bool,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let store = cli
        .settings
        .clone()
        .map(SettingsStore::new)
        .unwrap_or_else(SettingsStore::at_default_path);
    let mut settings = store.load();

    let mut config = GameConfig {
        width: cli.width,
        height: cli.height,
        ..GameConfig::default()
    };
    if cli.no_countdown {
        config.resume_countdown_ms = 0;
    }
    let seed = cli.seed.unwrap_or_else(rand::random);
    let game = GameState::new(config, seed)
        .context("invalid game configuration")?
        .with_best_score(settings.best_score);
    info!(seed, theme = %settings.theme, "starting");

    let mut view = GameView::default().with_palette(Palette::from_name(&settings.theme));
    if settings.first_run {
        view = view.with_controls_hint(CONTROLS_HINT);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, game, &mut view, &store, &mut settings);
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("open log file {}", path.display()))?;
    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(level)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    mut game: GameState,
    view: &mut GameView,
    store: &SettingsStore,
    settings: &mut Settings,
) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        game.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        save_best_on_quit(game.best_score(), store, settings);
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(ms);
        }

        for event in game.drain_events() {
            if event == GameEvent::Started {
                view.hide_controls_hint();
            }
            persist_on(event, store, settings);
        }
    }
}

/// Keep a best score reached in a session that was quit before it ended.
fn save_best_on_quit(best_score: u32, store: &SettingsStore, settings: &mut Settings) {
    if let Err(err) = store.record_best(settings, best_score) {
        warn!(err = %format!("{err:#}"), "could not save settings");
    }
}

/// Write settings back when an event changes what is stored.
fn persist_on(event: GameEvent, store: &SettingsStore, settings: &mut Settings) {
    let changed = match event {
        GameEvent::Started if settings.first_run => {
            settings.first_run = false;
            true
        }
        GameEvent::SessionFinished { best_score, .. } => settings.record_score(best_score),
        _ => false,
    };
    if changed {
        save(store, settings);
    }
}

fn save(store: &SettingsStore, settings: &Settings) {
    if let Err(err) = store.save(settings) {
        warn!(err = %format!("{err:#}"), "could not save settings");
    }
}
