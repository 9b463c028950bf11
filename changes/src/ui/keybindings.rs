//! Keybinding dispatcher for the review screen.
//!
//! Translates raw crossterm `KeyEvent`s into review events and returns a
//! `KeyAction` telling the runner whether an event must be fed into the
//! session. The dispatcher branches first on the help overlay, then on the
//! session state, so Browsing, ConfirmingApplyAll, and Rejecting each have an
//! isolated handler. View-only keys (the help overlay) mutate `AppState`
//! directly and never reach the session.

use changes_core::{ReviewEvent, ReviewState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::AppState;

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing for the session; redraw on the next render tick.
    Continue,
    /// Feed this event into the review session.
    Review(ReviewEvent),
}

/// Dispatches a key event to the handler matching the current state.
///
/// # Arguments
///
/// * `key`: the raw crossterm key event (code + modifiers)
/// * `state`: mutable reference to all UI state
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Ctrl-c always ends the review, whatever is on screen.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Review(ReviewEvent::Quit);
    }

    if state.show_help {
        return handle_help(key, state);
    }

    match state.session.state() {
        ReviewState::Browsing => handle_browsing(key, state),
        ReviewState::ConfirmingApplyAll => handle_confirm_apply(key),
        ReviewState::Rejecting { .. } | ReviewState::Terminal(_) => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Browsing
// ---------------------------------------------------------------------------

/// Handles a key event while browsing the file list.
fn handle_browsing(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let event = match key.code {
        KeyCode::Char('j') | KeyCode::Down => ReviewEvent::Move(1),
        KeyCode::Char('k') | KeyCode::Up => ReviewEvent::Move(-1),
        KeyCode::Char('g') | KeyCode::Home => ReviewEvent::MoveFirst,
        KeyCode::Char('G') | KeyCode::End => ReviewEvent::MoveLast,
        KeyCode::PageDown => ReviewEvent::Move(state.page_size()),
        KeyCode::PageUp => ReviewEvent::Move(-state.page_size()),

        KeyCode::Char('a') => ReviewEvent::RequestApplyAll,
        KeyCode::Char('r') | KeyCode::Char('d') => ReviewEvent::RequestReject,

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.show_help = true;
            return KeyAction::Continue;
        }

        KeyCode::Char('q') | KeyCode::Esc => ReviewEvent::Quit,

        _ => return KeyAction::Continue,
    };
    KeyAction::Review(event)
}

// ---------------------------------------------------------------------------
// ConfirmingApplyAll
// ---------------------------------------------------------------------------

/// Handles a key event while the apply-all confirmation dialog is active.
///
/// `y` / `Y` / `Enter` confirm, `n` / `N` / `Esc` cancel, `q` quits the whole
/// review. All other keys are ignored.
fn handle_confirm_apply(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            KeyAction::Review(ReviewEvent::Confirm)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            KeyAction::Review(ReviewEvent::Cancel)
        }
        KeyCode::Char('q') => KeyAction::Review(ReviewEvent::Quit),
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Help overlay
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// `?`, `Esc`, or `q` dismiss the overlay; `j` / `k` / `g` / `G` scroll it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.show_help = false,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: the scroll wheel moves the cursor while browsing,
/// or scrolls the help overlay when it is open.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let delta: isize = match mouse.kind {
        MouseEventKind::ScrollUp => -1,
        MouseEventKind::ScrollDown => 1,
        _ => return KeyAction::Continue,
    };

    if state.show_help {
        state.help_scroll = if delta < 0 {
            state.help_scroll.saturating_sub(3)
        } else {
            state.help_scroll.saturating_add(3)
        };
        return KeyAction::Continue;
    }

    match state.session.state() {
        ReviewState::Browsing => KeyAction::Review(ReviewEvent::Move(delta)),
        _ => KeyAction::Continue,
    }
}
