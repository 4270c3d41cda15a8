//! End-to-end pipeline tests: registry, coordinator, history, and modals
//! working together across ticks.

use std::cell::RefCell;
use std::rc::Rc;

use easel::console::{CommandRegistry, ExecutionCoordinator, PumpSource};
use pretty_assertions::assert_eq;

/// Builds a registry whose handlers record `name:category` invocations.
fn recording_registry(
    commands: &[(&str, i32)],
    calls: &Rc<RefCell<Vec<String>>>,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for (name, category) in commands {
        let calls = Rc::clone(calls);
        let label = name.to_string();
        registry.register(
            name,
            *category,
            Box::new(move |cat| calls.borrow_mut().push(format!("{label}:{cat}"))),
        );
    }
    registry
}

#[test]
fn test_first_registration_wins_across_case() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("Open", 1)], &calls);

    let shadowed = Rc::clone(&calls);
    let accepted = registry.register(
        "open",
        2,
        Box::new(move |cat| shadowed.borrow_mut().push(format!("shadow:{cat}"))),
    );
    assert!(!accepted);

    registry.dispatch("OPEN");
    assert_eq!(*calls.borrow(), ["open:1"]);
}

#[test]
fn test_mixed_sources_share_one_buffer() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("new", 0), ("line", 0), ("save", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    // A typed line and a programmatic submission interleave without losing
    // or reordering anything.
    coordinator.append_input("new line");
    coordinator.pump(&mut registry, PumpSource::Submission);
    coordinator.submit("save");
    coordinator.pump(&mut registry, PumpSource::Tick);
    coordinator.pump(&mut registry, PumpSource::Tick);

    assert_eq!(*calls.borrow(), ["new:0", "line:0", "save:0"]);
    assert_eq!(coordinator.buffer(), "");
}

#[test]
fn test_command_log_lines() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("save", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    coordinator.append_input("save");
    coordinator.pump(&mut registry, PumpSource::Submission);
    coordinator.append_input("doodle");
    coordinator.pump(&mut registry, PumpSource::Submission);

    assert_eq!(
        coordinator.drain_log(),
        [
            "Command: save",
            "Command: doodle",
            "Unknown command: doodle"
        ]
    );
    // Draining empties the log.
    assert!(coordinator.drain_log().is_empty());
}

#[test]
fn test_history_dedup_move_to_top() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("open", 0), ("save", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    for line in ["open", "save", "open"] {
        coordinator.append_input(line);
        coordinator.pump(&mut registry, PumpSource::Submission);
    }

    assert_eq!(coordinator.history().entries(), ["save", "open"]);
    assert_eq!(coordinator.history().latest(), Some("open"));
}

#[test]
fn test_raw_line_recorded_not_the_token() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("save", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    // History keeps the line as typed, while dispatch sees the extracted
    // token.
    coordinator.append_input("  Save!");
    coordinator.pump(&mut registry, PumpSource::Submission);

    assert_eq!(*calls.borrow(), ["save:0"]);
    assert_eq!(coordinator.history().entries(), ["Save!"]);
}

#[test]
fn test_empty_submission_reexecutes_without_history_change() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("circle", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    coordinator.append_input("circle");
    coordinator.pump(&mut registry, PumpSource::Submission);
    coordinator.append_input("");
    coordinator.pump(&mut registry, PumpSource::Submission);
    coordinator.append_input("   ");
    coordinator.pump(&mut registry, PumpSource::Submission);

    assert_eq!(*calls.borrow(), ["circle:0", "circle:0", "circle:0"]);
    assert_eq!(coordinator.history().entries(), ["circle"]);
}

#[test]
fn test_empty_submission_on_empty_history_logs_blank_command() {
    let mut registry = CommandRegistry::new();
    let mut coordinator = ExecutionCoordinator::new();

    coordinator.append_input("");
    coordinator.pump(&mut registry, PumpSource::Submission);

    assert_eq!(coordinator.drain_log(), ["Command:"]);
}

#[test]
fn test_modal_session_suspends_and_resumes_pipeline() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("line", 0), ("rect", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();
    let modal = coordinator.register_modal("confirm-quit").unwrap();

    coordinator.maintain_modal_state();
    assert!(!coordinator.is_executing());

    modal.set_visible(true);
    coordinator.maintain_modal_state();
    assert!(coordinator.is_executing());

    // Typing continues while the dialog is up; nothing runs.
    coordinator.append_input("line");
    coordinator.pump(&mut registry, PumpSource::Submission);
    coordinator.append_input("rect");
    coordinator.pump(&mut registry, PumpSource::Submission);
    assert!(calls.borrow().is_empty());

    // Dialog closes: the execution flag reverts to its pre-modal value and
    // the backlog drains one command per tick, none lost, none doubled.
    modal.set_visible(false);
    coordinator.maintain_modal_state();
    assert!(!coordinator.is_executing());
    coordinator.pump(&mut registry, PumpSource::Tick);
    coordinator.pump(&mut registry, PumpSource::Tick);
    coordinator.pump(&mut registry, PumpSource::Tick);

    assert_eq!(*calls.borrow(), ["line:0", "rect:0"]);
}

#[test]
fn test_modal_flag_forced_regardless_of_prior_value() {
    let mut coordinator = ExecutionCoordinator::new();
    let modal = coordinator.register_modal("props").unwrap();

    for _ in 0..3 {
        coordinator.maintain_modal_state();
    }

    modal.set_visible(true);
    coordinator.maintain_modal_state();
    assert!(coordinator.is_executing());

    modal.set_visible(false);
    coordinator.maintain_modal_state();
    // Reverts to exactly the value recorded when the modal appeared.
    assert!(!coordinator.is_executing());
}

#[test]
fn test_duplicate_modal_and_shortcut_style_rejection() {
    let mut coordinator = ExecutionCoordinator::new();
    let first = coordinator.register_modal("confirm").unwrap();
    assert!(coordinator.register_modal("confirm").is_none());

    // Dropping the handle frees the name for a fresh registration.
    drop(first);
    assert!(coordinator.register_modal("confirm").is_some());
}

#[test]
fn test_cancel_discards_backlog() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("line", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    coordinator.append_input("line line line");
    coordinator.cancel();
    coordinator.pump(&mut registry, PumpSource::Tick);

    assert!(calls.borrow().is_empty());
    assert_eq!(coordinator.buffer(), "");
}

#[test]
fn test_unregistered_command_stops_dispatching() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = recording_registry(&[("line", 0)], &calls);
    let mut coordinator = ExecutionCoordinator::new();

    coordinator.append_input("line");
    coordinator.pump(&mut registry, PumpSource::Submission);
    registry.unregister("line");
    coordinator.append_input("line");
    coordinator.pump(&mut registry, PumpSource::Submission);

    assert_eq!(*calls.borrow(), ["line:0"]);
    assert_eq!(
        coordinator.drain_log(),
        ["Command: line", "Command: line", "Unknown command: line"]
    );
}
