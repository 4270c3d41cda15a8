//! Shortcut dispatch and key-repeat timing, driven by a simulated clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::KeyCode;
use easel::console::{
    CommandRegistry, ExecutionCoordinator, KeyChord, KeyboardState, PumpSource,
    ShortcutDispatcher, REPEAT_THRESHOLD,
};

fn held_chord(ctrl: bool, key: char) -> KeyboardState {
    let mut keys = KeyboardState::new();
    keys.ctrl = ctrl;
    keys.key_down(KeyCode::Char(key));
    keys
}

#[test]
fn test_held_chord_fires_once_at_threshold() {
    let mut shortcuts = ShortcutDispatcher::new();
    shortcuts.register(KeyChord::ctrl(KeyCode::Char('z')), "undo");
    let keys = held_chord(true, 'z');

    // Monotonic clock fed at a fixed 10ms tick rate.
    let mut fires = Vec::new();
    for tick in 0..=40u64 {
        let now = Duration::from_millis(tick * 10);
        if shortcuts.scan(&keys, now).is_some() {
            fires.push(now);
        }
    }

    // Initial fire at 0, then exactly one fire each time the threshold
    // re-elapses — never before.
    assert_eq!(
        fires,
        [
            Duration::ZERO,
            REPEAT_THRESHOLD,
            REPEAT_THRESHOLD * 2,
        ]
    );
}

#[test]
fn test_release_rearms_immediately() {
    let mut shortcuts = ShortcutDispatcher::new();
    shortcuts.register(KeyChord::ctrl(KeyCode::Char('z')), "undo");

    assert!(shortcuts.scan(&held_chord(true, 'z'), Duration::ZERO).is_some());
    // Key released: the remembered tuple clears.
    assert!(shortcuts
        .scan(&KeyboardState::new(), Duration::from_millis(20))
        .is_none());
    // Pressed again well before the repeat threshold: fires anyway, because
    // the resolved tuple changed.
    assert!(shortcuts
        .scan(&held_chord(true, 'z'), Duration::from_millis(40))
        .is_some());
}

#[test]
fn test_duplicate_tuple_rejected() {
    let mut shortcuts = ShortcutDispatcher::new();
    let chord = KeyChord::parse("ctrl+shift+s").unwrap();
    assert!(shortcuts.register(chord, "saveas"));
    assert!(!shortcuts.register(chord, "save"));
    assert_eq!(shortcuts.binding(chord), Some("saveas"));

    // A different modifier set is a different tuple.
    assert!(shortcuts.register(KeyChord::parse("ctrl+s").unwrap(), "save"));
    assert_eq!(shortcuts.len(), 2);
}

#[test]
fn test_lower_key_in_scan_range_wins() {
    let mut shortcuts = ShortcutDispatcher::new();
    shortcuts.register(KeyChord::ctrl(KeyCode::Char('a')), "first");
    shortcuts.register(KeyChord::ctrl(KeyCode::Char('b')), "second");

    let mut keys = held_chord(true, 'b');
    keys.key_down(KeyCode::Char('a'));
    assert_eq!(shortcuts.scan(&keys, Duration::ZERO), Some("first"));
}

#[test]
fn test_fired_shortcut_flows_through_the_pipeline() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CommandRegistry::new();
    {
        let calls = Rc::clone(&calls);
        registry.register(
            "undo",
            0,
            Box::new(move |_| calls.borrow_mut().push("undo")),
        );
    }

    let mut coordinator = ExecutionCoordinator::new();
    let mut shortcuts = ShortcutDispatcher::new();
    shortcuts.register(KeyChord::ctrl(KeyCode::Char('z')), "undo");

    // The shortcut submits into the same buffer everything else uses; the
    // next pump dispatches it.
    if let Some(line) = shortcuts.scan(&held_chord(true, 'z'), Duration::ZERO) {
        let line = line.to_string();
        coordinator.submit(&line);
    }
    coordinator.pump(&mut registry, PumpSource::Tick);

    assert_eq!(*calls.borrow(), ["undo"]);
    assert_eq!(coordinator.history().entries(), ["undo"]);
}
