//! Keyboard shortcut dispatch.
//!
//! Maps modifier+key chords to command lines. The host builds a
//! [`KeyboardState`] snapshot per tick; [`ShortcutDispatcher::scan`] resolves
//! the currently held chord and decides whether it fires. A newly resolved
//! chord fires immediately; a chord held unchanged re-fires only after
//! [`REPEAT_THRESHOLD`] of continuous hold, with the timer reset on every
//! fire. Time is injected as a monotonic [`Duration`] so the repeat logic is
//! testable without a real clock.
//!
//! When several scannable keys are held at once, a fixed scan order (digits,
//! then letters, then punctuation) picks the winner — a documented
//! tie-break, not an error.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

/// Hold time before an unchanged chord re-fires.
pub const REPEAT_THRESHOLD: Duration = Duration::from_millis(200);

/// Punctuation keys eligible for shortcut chords, in scan order.
const PUNCTUATION_SCAN: &[char] = &[
    '-', '+', '_', '=', '[', ']', ';', '\'', ',', '.', '/', '\\', '`',
];

/// A modifier set plus one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub super_key: bool,
    pub code: KeyCode,
}

impl KeyChord {
    /// Creates a chord with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: false,
            super_key: false,
            code,
        }
    }

    /// Creates a ctrl+key chord.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::new(code)
        }
    }

    /// Parses a chord string like `"ctrl+shift+n"`.
    ///
    /// Modifier names: `ctrl`/`control`, `shift`, `alt`, `super`/`cmd`/`win`.
    /// The key is a single character; `space` names the space bar.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut chord = Self::new(KeyCode::Null);
        let mut key_seen = false;

        for part in input.split('+') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "shift" => chord.shift = true,
                "alt" => chord.alt = true,
                "super" | "cmd" | "win" => chord.super_key = true,
                "space" => {
                    if key_seen {
                        return Err(format!("more than one key in chord `{input}`"));
                    }
                    chord.code = KeyCode::Char(' ');
                    key_seen = true;
                }
                key => {
                    let mut chars = key.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return Err(format!("unknown key `{key}` in chord `{input}`"));
                    };
                    if key_seen {
                        return Err(format!("more than one key in chord `{input}`"));
                    }
                    chord.code = KeyCode::Char(c.to_ascii_lowercase());
                    key_seen = true;
                }
            }
        }

        if !key_seen {
            return Err(format!("chord `{input}` names no key"));
        }
        Ok(chord)
    }

    /// Lower-cases a `Char` key so lookups never depend on shift state.
    fn normalized(mut self) -> Self {
        if let KeyCode::Char(c) = self.code {
            self.code = KeyCode::Char(c.to_ascii_lowercase());
        }
        self
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.super_key {
            write!(f, "super+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Per-tick snapshot of held modifiers and keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub super_key: bool,
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key as held. `Char` keys are stored lower-cased.
    pub fn key_down(&mut self, code: KeyCode) {
        self.held.insert(normalize_code(code));
    }

    /// Records a key release.
    pub fn key_up(&mut self, code: KeyCode) {
        self.held.remove(&normalize_code(code));
    }

    /// Updates the modifier booleans from a crossterm modifier set.
    pub fn set_modifiers(&mut self, modifiers: KeyModifiers) {
        self.ctrl = modifiers.contains(KeyModifiers::CONTROL);
        self.shift = modifiers.contains(KeyModifiers::SHIFT);
        self.alt = modifiers.contains(KeyModifiers::ALT);
        self.super_key = modifiers.contains(KeyModifiers::SUPER);
    }

    /// Returns true if the key is currently held.
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&normalize_code(code))
    }

    /// Releases all keys and modifiers (e.g. on focus change).
    pub fn release_all(&mut self) {
        self.held.clear();
        self.ctrl = false;
        self.shift = false;
        self.alt = false;
        self.super_key = false;
    }
}

fn normalize_code(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// The fixed scan order over chord-eligible keys.
fn scan_order() -> impl Iterator<Item = char> {
    ('0'..='9')
        .chain('a'..='z')
        .chain(PUNCTUATION_SCAN.iter().copied())
}

#[derive(Debug, Clone, Copy)]
struct ActiveChord {
    chord: KeyChord,
    last_fired: Duration,
}

/// Shortcut table plus the hold/repeat timer state.
#[derive(Debug, Default)]
pub struct ShortcutDispatcher {
    bindings: HashMap<KeyChord, String>,
    active: Option<ActiveChord>,
}

impl ShortcutDispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `chord` to a command line to submit when it fires.
    ///
    /// Returns false (and logs a diagnostic) if the exact chord is already
    /// bound; the prior binding stands.
    pub fn register(&mut self, chord: KeyChord, command_line: &str) -> bool {
        let chord = chord.normalized();
        if self.bindings.contains_key(&chord) {
            warn!(chord = %chord, "duplicate shortcut registration rejected");
            return false;
        }
        self.bindings.insert(chord, command_line.to_string());
        true
    }

    /// Returns the command line bound to `chord`, if any.
    pub fn binding(&self, chord: KeyChord) -> Option<&str> {
        self.bindings.get(&chord.normalized()).map(String::as_str)
    }

    /// Returns the number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolves the held chord for this tick and decides whether it fires.
    ///
    /// Returns the bound command line on a fire. The resolved chord is
    /// remembered whether or not it is bound, so an unbound chord held down
    /// does not retrigger a previously fired one.
    pub fn scan(&mut self, keys: &KeyboardState, now: Duration) -> Option<&str> {
        let Some(chord) = resolve_chord(keys) else {
            self.active = None;
            return None;
        };

        let fired = match self.active {
            Some(active) if active.chord == chord => {
                if now.saturating_sub(active.last_fired) >= REPEAT_THRESHOLD {
                    self.active = Some(ActiveChord {
                        chord,
                        last_fired: now,
                    });
                    true
                } else {
                    false
                }
            }
            _ => {
                self.active = Some(ActiveChord {
                    chord,
                    last_fired: now,
                });
                true
            }
        };

        if fired {
            self.bindings.get(&chord).map(String::as_str)
        } else {
            None
        }
    }
}

/// Builds the chord for the current snapshot: the held modifier set plus the
/// first held key in scan order.
fn resolve_chord(keys: &KeyboardState) -> Option<KeyChord> {
    let code = scan_order()
        .map(KeyCode::Char)
        .find(|code| keys.is_held(*code))?;
    Some(KeyChord {
        ctrl: keys.ctrl,
        shift: keys.shift,
        alt: keys.alt,
        super_key: keys.super_key,
        code,
    })
}
