//! Input management system
//!
//! Input is polled once per tick, before any entity update runs. Entities only
//! ever see a read-only [`InputState`] snapshot for the tick in progress.

use std::collections::HashMap;

/// Key state mapping (key → pressed) for the current tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<KeyCode, bool>,
}

impl InputState {
    /// Create an input state with every key released
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        self.keys.insert(key, pressed);
    }

    /// Press a key (builder style, handy for scripted input)
    #[must_use]
    pub fn with_pressed(mut self, key: KeyCode) -> Self {
        self.set_key(key, true);
        self
    }

    /// Whether `key` is currently held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Iterator over keys that are currently held
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys
            .iter()
            .filter_map(|(key, pressed)| pressed.then_some(*key))
    }
}

/// Input collaborator polled by the scene at the start of each tick
pub trait InputSource {
    /// Refresh `state` with the current key states
    fn poll(&mut self, state: &mut InputState);

    /// Whether the user asked to close the game (checked between ticks)
    fn close_requested(&self) -> bool;
}

/// Scripted input source: replays a fixed key state every tick
///
/// Used by tests and headless runs in place of a real keyboard.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    state: InputState,
    close: bool,
}

impl ScriptedInput {
    /// Create a scripted source with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold or release a key from the next poll on
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        self.state.set_key(key, pressed);
    }

    /// Release every key from the next poll on
    pub fn release_all(&mut self) {
        self.state.clear();
    }

    /// Ask the driving loop to stop
    pub fn request_close(&mut self) {
        self.close = true;
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, state: &mut InputState) {
        state.clone_from(&self.state);
    }

    fn close_requested(&self) -> bool {
        self.close
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Q key
    Q,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_read_as_released() {
        let state = InputState::new();
        assert!(!state.is_pressed(KeyCode::Left));
    }

    #[test]
    fn test_scripted_input_replaces_state_on_poll() {
        let mut source = ScriptedInput::new();
        let mut state = InputState::new().with_pressed(KeyCode::Up);

        source.set_key(KeyCode::Left, true);
        source.poll(&mut state);
        assert!(state.is_pressed(KeyCode::Left));
        assert!(!state.is_pressed(KeyCode::Up));

        source.release_all();
        source.poll(&mut state);
        assert_eq!(state.pressed_keys().count(), 0);
    }
}
