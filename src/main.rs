//! Terminal runner (default binary).
//!
//! A [`Ticker`] paces the loop. Each tick drains pending key events, applies held-key
//! repeats, advances gravity by the measured elapsed time and redraws when anything
//! visible changed.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

use blockfall::config::Config;
use blockfall::core::GameSnapshot;
use blockfall::engine::{GameDriver, Ticker};
use blockfall::input::{handle_key_event, should_quit, InputHandler};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

fn main() -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    logging::init(&config)?;
    if config.frame_ms_clamped() {
        warn!(
            frame_ms = config.frame_ms,
            used_ms = config.frame_period().as_millis() as u64,
            "frame period out of range, clamped"
        );
    }

    let seed = config.seed_or_clock();
    info!(seed, frame_ms = config.frame_period().as_millis() as u64, "starting");

    let mut term = TerminalRenderer::default();
    term.enter()?;

    let result = run(&mut term, &config, seed);

    // Always restore the terminal, even when the loop failed.
    let restored = term.exit();
    if let Err(err) = &result {
        warn!(error = %err, "game loop failed");
    }
    result.and(restored)
}

/// Loop state that outlives a single tick.
struct Session {
    driver: GameDriver,
    input: InputHandler,
    view: GameView,
    viewport: Viewport,
    snapshot: GameSnapshot,
    fb: FrameBuffer,
    last_drawn: Option<u64>,
}

enum Flow {
    Continue,
    Quit,
}

impl Session {
    fn dispatch(&mut self, action: GameAction) {
        if self.driver.dispatch(action) && !action.is_piece_action() {
            // Keys held across a pause or restart must not keep repeating.
            self.input.clear();
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if should_quit(key) {
                    return Flow::Quit;
                }
                if let Some(action) = handle_key_event(key).and_then(|a| self.input.press(a)) {
                    self.dispatch(action);
                }
            }
            KeyEventKind::Release => {
                if let Some(action) = handle_key_event(key) {
                    self.input.release(action);
                }
            }
        }
        Flow::Continue
    }

    fn on_resize(&mut self, term: &mut TerminalRenderer, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        term.invalidate();
        self.last_drawn = None;
    }

    fn draw(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        self.driver.snapshot_into(&mut self.snapshot);
        let fingerprint = self.snapshot.fingerprint();
        if self.last_drawn == Some(fingerprint) {
            return Ok(());
        }
        self.view
            .render_into(&self.snapshot, self.viewport, &mut self.fb);
        term.draw_swap(&mut self.fb)?;
        self.last_drawn = Some(fingerprint);
        Ok(())
    }
}

fn run(term: &mut TerminalRenderer, config: &Config, seed: u32) -> Result<()> {
    let mut session = Session {
        driver: GameDriver::new(seed, config.rules),
        input: InputHandler::new(),
        view: GameView::default(),
        viewport: term.viewport()?,
        snapshot: GameSnapshot::default(),
        fb: FrameBuffer::new(0, 0),
        last_drawn: None,
    };

    let period = config.frame_period();
    let mut ticker = Ticker::start(period).context("starting frame ticker")?;
    let idle_timeout = period.saturating_mul(4);
    session.draw(term)?;

    while ticker.is_running() {
        let Some(tick) = ticker.recv_timeout(idle_timeout) else {
            continue;
        };

        while event::poll(Duration::ZERO)? {
            let flow = match event::read()? {
                Event::Key(key) => session.on_key(key),
                Event::Resize(width, height) => {
                    session.on_resize(term, width, height);
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
            if let Flow::Quit = flow {
                ticker.stop();
                debug!(score = session.driver.state().score(), "quit requested");
                return Ok(());
            }
        }

        for action in session.input.update(tick.elapsed_ms) {
            session.dispatch(action);
        }
        session.driver.frame(tick.elapsed_ms);
        session.draw(term)?;
    }
    Ok(())
}
