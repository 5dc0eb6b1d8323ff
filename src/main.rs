//! Terminal 2048 runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! A move is committed the moment its key is pressed; the slide animation and
//! the delayed tile spawn are replayed afterwards, and any new key fast-forwards
//! them.

use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, warn};

use tui_2048::best_score::BestScoreStore;
use tui_2048::config::AppConfig;
use tui_2048::core::{GameSnapshot, Session, SimpleRng};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, SlideAnimation, TerminalRenderer, Viewport};
use tui_2048::types::{GameAction, SPAWN_DELAY_MS, TICK_MS};

/// A committed move whose spawn is still outstanding.
struct PendingMove {
    slide: Option<SlideAnimation>,
    spawn_at: Instant,
}

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let mut store = config.best_score_path.clone().map(BestScoreStore::new);
    let best = match store.as_mut().map(BestScoreStore::load) {
        Some(Ok(best)) => best,
        Some(Err(e)) => {
            warn!("{e:#}");
            0
        }
        None => 0,
    };

    let mut session = Session::<SimpleRng>::new(config.seed);
    session.set_best_score(best);
    info!("seed {}, best score {}", config.seed, best);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut store, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    persist_best(&mut store, session.best_score());
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn persist_best(store: &mut Option<BestScoreStore>, best: u32) {
    if let Some(store) = store.as_mut() {
        if let Err(e) = store.save(best) {
            warn!("{e:#}");
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    store: &mut Option<BestScoreStore>,
    config: &AppConfig,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut pending: Option<PendingMove> = None;

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let spawn_delay = if config.animate {
        Duration::from_millis(SPAWN_DELAY_MS as u64)
    } else {
        Duration::ZERO
    };
    let mut last_tick = Instant::now();

    loop {
        // Advance the in-flight move.
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_millis() as u32;
        last_tick = now;
        if let Some(p) = pending.as_mut() {
            if let Some(slide) = p.slide.as_mut() {
                slide.advance(dt);
            }
            if now >= p.spawn_at {
                session.finish_move();
                pending = None;
                persist_best(store, session.best_score());
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        let slide = pending
            .as_ref()
            .and_then(|p| p.slide.as_ref())
            .filter(|s| !s.is_done());
        view.render_frame_into(&snap, slide, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        if !event::poll(tick_duration)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };

                if pending.take().is_some() {
                    session.finish_move();
                }

                match action {
                    GameAction::Move(direction) => {
                        let before = *session.grid();
                        match session.begin_move(direction) {
                            Ok(result) if result.changed => {
                                pending = Some(PendingMove {
                                    slide: config
                                        .animate
                                        .then(|| SlideAnimation::new(before, &result)),
                                    spawn_at: Instant::now() + spawn_delay,
                                });
                            }
                            Ok(_) => {}
                            Err(e) => debug!("{direction} ignored: {e}"),
                        }
                    }
                    other => {
                        if let Err(e) = session.apply_action(other) {
                            debug!("{other:?} ignored: {e}");
                        }
                    }
                }
                persist_best(store, session.best_score());
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
