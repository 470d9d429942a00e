//! Terminal polyomino runner (default binary).
//!
//! Fixed-step loop: poll input until the next tick, advance the game clock,
//! render through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_polyomino::core::{GameSnapshot, GameState, RingLog};
use tui_polyomino::input::{handle_key_event, should_quit};
use tui_polyomino::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_polyomino::GameConfig;

fn main() -> Result<()> {
    let config = GameConfig::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let log = if config.log_enabled {
        RingLog::default()
    } else {
        RingLog::disabled()
    };
    let mut game = GameState::new(config.seed).with_log(log);
    game.start();

    let view = GameView::default().with_log_lines(config.log_lines);
    let mut snap = GameSnapshot::default();
    snap.log_limit = config.log_lines;
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 30));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time so slow frames don't slow gravity.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(ms);
        }
    }
}
