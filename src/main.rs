//! Terminal rhythm game runner (default binary).
//!
//! Loads a score, then runs a fixed 5ms tick loop with crossterm input and the
//! framebuffer renderer.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::LevelFilter;

use tui_rhythm::core::GameSnapshot;
use tui_rhythm::engine::{
    Cli, GameConfig, HighScoreStore, LogSound, Session, SilentSound, Song, SoundEngine,
};
use tui_rhythm::input::{handle_key_event, should_quit, InputHandler};
use tui_rhythm::term::{fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_rhythm::types::{GameAction, FRAME_MS, TICK_MS};

/// Redraw interval when nothing on screen is moving
const IDLE_FRAME_MS: u64 = 250;

fn main() -> Result<()> {
    let config = GameConfig::from_env().with_cli(Cli::parse());
    init_logging(&config)?;

    // A bad score file is reported before the terminal changes mode.
    let song = Song::load(&config.song_path)?;
    let sound: Box<dyn SoundEngine> = if config.mute {
        Box::new(SilentSound)
    } else {
        Box::new(LogSound)
    };
    let store = HighScoreStore::new(config.highscore_path.clone());
    let mut session = Session::new(&song, sound, store);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("game loop failed: {e:#}");
    }
    result
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Off);

    // The terminal is in raw mode, so logs only go to stderr when asked for.
    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        builder.parse_filters(config.log_filter.as_deref().unwrap_or("info"));
    } else if let Some(filter) = &config.log_filter {
        builder.parse_filters(filter);
    }

    let _ = builder.try_init();
    Ok(())
}

fn run<S: SoundEngine>(
    term: &mut TerminalRenderer,
    session: &mut Session<S>,
    config: &GameConfig,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new()
        .with_key_release_timeout_ms(config.key_release_timeout_ms)
        .with_release_events(term.release_events());
    log::info!(
        "input: release events {}",
        if term.release_events() { "on" } else { "off (timeout)" }
    );

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(u64::from(FRAME_MS), IDLE_FRAME_MS);

    let tick_ms = u64::from(TICK_MS);
    let started = Instant::now();
    let mut consumed_ms: u64 = 0;

    loop {
        // Render.
        let now_ms = started.elapsed().as_millis() as u64;
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.frame_into(&mut snap);
        let is_static = !snap.playable() || (snap.markers.is_empty() && snap.tails.is_empty());
        if throttle.should_render(now_ms, fingerprint(&snap, viewport), is_static) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = Duration::from_millis((consumed_ms + tick_ms).saturating_sub(now_ms));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if key.kind == KeyEventKind::Press && should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = input.handle_key_press(key.code) {
                            session.dispatch(action);
                        }

                        if key.kind == KeyEventKind::Press {
                            if let Some(action) = handle_key_event(key) {
                                if action == GameAction::Restart {
                                    input.clear_held();
                                }
                                session.dispatch(action);
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = input.handle_key_release(key.code) {
                            session.dispatch(action);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now_ms = started.elapsed().as_millis() as u64;
        let elapsed = now_ms.saturating_sub(consumed_ms);
        if elapsed >= tick_ms {
            consumed_ms = now_ms;

            for action in input.update(u32::try_from(elapsed).unwrap_or(u32::MAX)) {
                session.dispatch(action);
            }
            session.advance(elapsed);
        }
    }
}
