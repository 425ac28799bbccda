//! Keyboard input from crossterm events

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use scene_engine::input::{InputSource, InputState, KeyCode};

const GAME_KEYS: [KeyCode; 8] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::Q,
];

/// [`InputSource`] reading the terminal's key events
///
/// Most terminals only report presses and auto-repeats, so a key counts as
/// held until `hold` has passed since its last event. Terminals that report
/// releases end the hold immediately.
#[derive(Debug)]
pub struct TerminalInput {
    hold: Duration,
    last_seen: HashMap<KeyCode, Instant>,
    close: bool,
}

impl TerminalInput {
    /// Input source with the given key hold window
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            last_seen: HashMap::new(),
            close: false,
        }
    }

    /// Record one key event observed at `now`
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == event::KeyCode::Char('c')
        {
            self.close = true;
            return;
        }

        let Some(code) = map_key(key.code) else {
            return;
        };
        if matches!(code, KeyCode::Escape | KeyCode::Q) {
            self.close = true;
        }
        match key.kind {
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, now);
            }
        }
    }

    /// Write the held keys as of `now` into `state`
    pub fn apply(&self, state: &mut InputState, now: Instant) {
        for key in GAME_KEYS {
            let held = self
                .last_seen
                .get(&key)
                .is_some_and(|seen| now.saturating_duration_since(*seen) <= self.hold);
            state.set_key(key, held);
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, state: &mut InputState) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key, Instant::now()),
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
        self.apply(state, Instant::now());
    }

    fn close_requested(&self) -> bool {
        self.close
    }
}

fn map_key(code: event::KeyCode) -> Option<KeyCode> {
    match code {
        event::KeyCode::Up => Some(KeyCode::Up),
        event::KeyCode::Down => Some(KeyCode::Down),
        event::KeyCode::Left => Some(KeyCode::Left),
        event::KeyCode::Right => Some(KeyCode::Right),
        event::KeyCode::Enter => Some(KeyCode::Enter),
        event::KeyCode::Esc => Some(KeyCode::Escape),
        event::KeyCode::Char(' ') => Some(KeyCode::Space),
        event::KeyCode::Char('q' | 'Q') => Some(KeyCode::Q),
        _ => None,
    }
}
