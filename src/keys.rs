// Keyboard input: key identifiers, binding table, raw terminal reader
//
// Controls:
//   Up/Down    move forward/backward in x
//   Left/Right rotate left/right (yaw)
//   i/,        move up/down in z
//   k/m        move left/right in y
//   +/-        increase/decrease step
//   s          reset pose to default
//   Ctrl-C     quit

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::{debug, warn};

/// Help text logged on startup
pub const CONTROLS: &str = "Arrows=move x/yaw, i/,=z up/down, k/m=y left/right, +/-=step, s=reset, Ctrl-C=quit";

/// A keystroke the teleop understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Ctrl-C (0x03 in raw mode)
    Interrupt,
}

impl Key {
    /// Decode a raw key identifier: one character or an arrow escape (ESC [ A..D)
    #[cfg(test)]
    pub fn from_sequence(seq: &str) -> Option<Self> {
        match seq {
            "\x1b[A" => Some(Key::Up),
            "\x1b[B" => Some(Key::Down),
            "\x1b[C" => Some(Key::Right),
            "\x1b[D" => Some(Key::Left),
            "\x03" => Some(Key::Interrupt),
            _ => {
                let mut chars = seq.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c != '\x1b' => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Map a crossterm key event; releases, unknown codes and Ctrl/Alt
    /// chords (other than Ctrl-C) yield None
    pub fn from_event(ev: &KeyEvent) -> Option<Self> {
        if !matches!(ev.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }
        match ev.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::Interrupt)
            }
            // Shift is fine ('+' needs it on most layouts)
            KeyCode::Char(c)
                if !ev
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Key::Char(c))
            }
            _ => None,
        }
    }
}

/// Unit increments, scaled by the current step when applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
}

impl Delta {
    const fn new(x: f64, y: f64, z: f64, yaw: f64) -> Self {
        Self { x, y, z, yaw }
    }
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Delta(Delta),
    Reset,
    IncreaseStep,
    DecreaseStep,
}

impl Binding {
    /// Fixed key table; None for unbound keys (including Interrupt)
    pub fn for_key(key: Key) -> Option<Self> {
        let binding = match key {
            // Arrow keys
            Key::Up => Binding::Delta(Delta::new(1.0, 0.0, 0.0, 0.0)),
            Key::Down => Binding::Delta(Delta::new(-1.0, 0.0, 0.0, 0.0)),
            Key::Left => Binding::Delta(Delta::new(0.0, 0.0, 0.0, 1.0)),
            Key::Right => Binding::Delta(Delta::new(0.0, 0.0, 0.0, -1.0)),

            // Normal keys
            Key::Char('i') => Binding::Delta(Delta::new(0.0, 0.0, 1.0, 0.0)),
            Key::Char(',') => Binding::Delta(Delta::new(0.0, 0.0, -1.0, 0.0)),
            Key::Char('k') => Binding::Delta(Delta::new(0.0, 1.0, 0.0, 0.0)),
            Key::Char('m') => Binding::Delta(Delta::new(0.0, -1.0, 0.0, 0.0)),
            Key::Char('s') => Binding::Reset,
            Key::Char('+') => Binding::IncreaseStep,
            Key::Char('-') => Binding::DecreaseStep,

            _ => return None,
        };
        Some(binding)
    }
}

/// Anything that yields keystrokes with a bounded wait
///
/// `next_key` runs on the async runtime next to the shutdown signal, so it
/// must not block the thread while waiting; blocking reads belong on
/// `spawn_blocking`.
#[allow(async_fn_in_trait)] // only used through generics, never boxed
pub trait KeySource {
    /// Wait up to `timeout` for one key; Ok(None) on timeout or unbound input
    async fn next_key(&mut self, timeout: Duration) -> io::Result<Option<Key>>;
}

/// Raw mode held for the guard's lifetime, cooked mode restored on drop
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        debug!("Terminal switched to raw mode");
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        match disable_raw_mode() {
            Ok(()) => debug!("Terminal mode restored"),
            Err(e) => warn!("Failed to restore terminal mode: {}", e),
        }
    }
}

/// Keys read from the controlling terminal via crossterm
pub struct TerminalKeys {
    _raw: RawModeGuard,
}

impl TerminalKeys {
    pub fn open() -> io::Result<Self> {
        Ok(Self {
            _raw: RawModeGuard::acquire()?,
        })
    }
}

impl KeySource for TerminalKeys {
    async fn next_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        // crossterm's poll blocks; keep it off the runtime thread
        tokio::task::spawn_blocking(move || read_key(timeout))
            .await
            .map_err(io::Error::other)?
    }
}

fn read_key(timeout: Duration) -> io::Result<Option<Key>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(ev) => Ok(Key::from_event(&ev)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_arrow_escape_sequences() {
        assert_eq!(Key::from_sequence("\x1b[A"), Some(Key::Up));
        assert_eq!(Key::from_sequence("\x1b[B"), Some(Key::Down));
        assert_eq!(Key::from_sequence("\x1b[C"), Some(Key::Right));
        assert_eq!(Key::from_sequence("\x1b[D"), Some(Key::Left));
    }

    #[test]
    fn test_single_character_sequences() {
        assert_eq!(Key::from_sequence("i"), Some(Key::Char('i')));
        assert_eq!(Key::from_sequence("+"), Some(Key::Char('+')));
        assert_eq!(Key::from_sequence("\x03"), Some(Key::Interrupt));
    }

    #[test]
    fn test_malformed_sequences() {
        assert_eq!(Key::from_sequence(""), None);
        assert_eq!(Key::from_sequence("\x1b"), None);
        assert_eq!(Key::from_sequence("\x1b[Z"), None);
        assert_eq!(Key::from_sequence("ab"), None);
    }

    #[test]
    fn test_ctrl_c_event_is_interrupt() {
        let ev = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&ev), Some(Key::Interrupt));

        let plain = press(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(Key::from_event(&plain), Some(Key::Char('c')));
    }

    #[test]
    fn test_modified_chords_not_bound() {
        for (code, modifiers) in [
            (KeyCode::Char('s'), KeyModifiers::CONTROL),
            (KeyCode::Char('k'), KeyModifiers::CONTROL),
            (KeyCode::Char('i'), KeyModifiers::ALT),
            (KeyCode::Char('m'), KeyModifiers::CONTROL | KeyModifiers::ALT),
        ] {
            let ev = press(code, modifiers);
            assert_eq!(Key::from_event(&ev), None, "{:?} + {:?}", modifiers, code);
        }
    }

    #[test]
    fn test_shifted_characters_still_bound() {
        let ev = press(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(Key::from_event(&ev), Some(Key::Char('+')));
        let binding = Key::from_event(&ev).and_then(Binding::for_key);
        assert_eq!(binding, Some(Binding::IncreaseStep));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut ev = press(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&ev), Some(Key::Up));
        ev.kind = KeyEventKind::Release;
        assert_eq!(Key::from_event(&ev), None);
    }

    #[test]
    fn test_unmapped_codes() {
        let ev = press(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(Key::from_event(&ev), None);
    }

    #[test]
    fn test_binding_table() {
        assert_eq!(
            Binding::for_key(Key::Left),
            Some(Binding::Delta(Delta::new(0.0, 0.0, 0.0, 1.0)))
        );
        assert_eq!(
            Binding::for_key(Key::Char('m')),
            Some(Binding::Delta(Delta::new(0.0, -1.0, 0.0, 0.0)))
        );
        assert_eq!(Binding::for_key(Key::Char('s')), Some(Binding::Reset));
        assert_eq!(Binding::for_key(Key::Char('+')), Some(Binding::IncreaseStep));
        assert_eq!(Binding::for_key(Key::Char('-')), Some(Binding::DecreaseStep));
        assert_eq!(Binding::for_key(Key::Char('q')), None);
        assert_eq!(Binding::for_key(Key::Interrupt), None);
    }
}
