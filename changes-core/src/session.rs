//! Review state machine for a set of pending plan changes.
//!
//! `ReviewSession` owns the change set and a cursor over it. Every input is a
//! `ReviewEvent` passed to [`ReviewSession::handle`], which mutates the session
//! and returns a `Step` telling the caller what to do next. The session never
//! performs I/O: rejecting a file is requested through `Step::Reject` and the
//! caller reports the result back as `RejectSucceeded` or `RejectFailed`.
//!
//! # States
//!
//! | State                | Leaves on                                           |
//! |----------------------|-----------------------------------------------------|
//! | `Browsing`           | apply-all request, reject request, quit             |
//! | `ConfirmingApplyAll` | confirm (terminal), cancel (back to browsing), quit |
//! | `Rejecting`          | reject success / failure, quit                      |
//! | `Terminal`           | never                                               |

use tracing::debug;

use crate::change_set::PlanChangeSet;
use crate::error::RejectError;
use crate::outcome::ReviewOutcome;

/// Why a session stopped accepting events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCause {
    /// The user confirmed applying every remaining change.
    ApplyAllConfirmed,
    /// A successful reject removed the last pending file.
    AllFilesRejected,
    /// The user quit without applying anything.
    UserQuit,
    /// The reject round trip failed; the review is aborted.
    RejectFailed,
}

/// Current position of the session in its state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReviewState {
    /// Navigating the file list (initial state).
    #[default]
    Browsing,
    /// Waiting for the user to confirm or cancel applying all changes.
    ConfirmingApplyAll,
    /// A reject for `path` is in flight.
    Rejecting { path: String },
    /// No further transitions are possible.
    Terminal(TerminalCause),
}

impl ReviewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewState::Terminal(_))
    }
}

/// Inputs accepted by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEvent {
    /// Move the cursor by `delta` entries; out-of-range targets clamp.
    Move(isize),
    /// Jump to the first file.
    MoveFirst,
    /// Jump to the last file.
    MoveLast,
    RequestApplyAll,
    Confirm,
    Cancel,
    /// Reject the file under the cursor.
    RequestReject,
    RejectSucceeded,
    RejectFailed(RejectError),
    Quit,
}

/// What the driver of the session should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep reading input.
    Continue,
    /// Run the reject operation for this path and report the result.
    Reject(String),
    /// The session is terminal; stop the loop.
    Finished(TerminalCause),
}

/// Interactive review over a [`PlanChangeSet`].
#[derive(Debug, Clone)]
pub struct ReviewSession {
    change_set: PlanChangeSet,
    cursor: usize,
    state: ReviewState,
    last_reject_error: Option<RejectError>,
    apply_all_requested: bool,
    just_rejected_file: bool,
}

impl ReviewSession {
    /// Starts a session in `Browsing` with the cursor on the first file.
    pub fn new(change_set: PlanChangeSet) -> Self {
        Self {
            change_set,
            cursor: 0,
            state: ReviewState::Browsing,
            last_reject_error: None,
            apply_all_requested: false,
            just_rejected_file: false,
        }
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn change_set(&self) -> &PlanChangeSet {
        &self.change_set
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Path under the cursor, or `None` once the set is empty.
    pub fn selected_path(&self) -> Option<&str> {
        self.change_set.get(self.cursor)
    }

    pub fn last_reject_error(&self) -> Option<&RejectError> {
        self.last_reject_error.as_ref()
    }

    pub fn apply_all_requested(&self) -> bool {
        self.apply_all_requested
    }

    /// True only right after a successful reject.
    pub fn just_rejected_file(&self) -> bool {
        self.just_rejected_file
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn terminal_cause(&self) -> Option<TerminalCause> {
        match self.state {
            ReviewState::Terminal(cause) => Some(cause),
            _ => None,
        }
    }

    /// Applies one event and returns the resulting step.
    ///
    /// `Quit` ends the session from any non-terminal state. Events that make no
    /// sense in the current state are ignored. Once terminal, every event is
    /// ignored and `Step::Finished` is returned again.
    pub fn handle(&mut self, event: ReviewEvent) -> Step {
        if let ReviewState::Terminal(cause) = self.state {
            return Step::Finished(cause);
        }

        self.just_rejected_file = false;

        if matches!(event, ReviewEvent::Quit) {
            return self.finish(TerminalCause::UserQuit);
        }

        match &self.state {
            ReviewState::Browsing => self.handle_browsing(event),
            ReviewState::ConfirmingApplyAll => self.handle_confirming(event),
            ReviewState::Rejecting { path } => {
                let path = path.clone();
                self.handle_rejecting(path, event)
            }
            ReviewState::Terminal(cause) => Step::Finished(*cause),
        }
    }

    /// Consumes a terminal session and returns its tagged summary.
    ///
    /// Returns `None` while the session is still running.
    pub fn into_outcome(self) -> Option<ReviewOutcome> {
        let cause = self.terminal_cause()?;
        let outcome = match cause {
            TerminalCause::ApplyAllConfirmed => ReviewOutcome::ApplyAll {
                change_set: self.change_set,
            },
            TerminalCause::AllFilesRejected => ReviewOutcome::AllRejected,
            TerminalCause::UserQuit if self.change_set.is_empty() => ReviewOutcome::NothingPending,
            TerminalCause::UserQuit => ReviewOutcome::Quit {
                change_set: self.change_set,
            },
            TerminalCause::RejectFailed => ReviewOutcome::RejectFailed(
                self.last_reject_error
                    .unwrap_or_else(|| RejectError::new("reject failed")),
            ),
        };
        Some(outcome)
    }

    // -----------------------------------------------------------------------
    // Per-state handlers
    // -----------------------------------------------------------------------

    fn handle_browsing(&mut self, event: ReviewEvent) -> Step {
        match event {
            ReviewEvent::Move(delta) => self.move_cursor(delta),
            ReviewEvent::MoveFirst => self.cursor = 0,
            ReviewEvent::MoveLast => self.cursor = self.last_index(),
            ReviewEvent::RequestApplyAll if !self.change_set.is_empty() => {
                self.state = ReviewState::ConfirmingApplyAll;
            }
            ReviewEvent::RequestReject => {
                if let Some(path) = self.selected_path().map(str::to_owned) {
                    debug!(%path, "reject requested");
                    self.state = ReviewState::Rejecting { path: path.clone() };
                    return Step::Reject(path);
                }
            }
            _ => {}
        }
        Step::Continue
    }

    fn handle_confirming(&mut self, event: ReviewEvent) -> Step {
        match event {
            ReviewEvent::Confirm => {
                self.apply_all_requested = true;
                self.last_reject_error = None;
                self.finish(TerminalCause::ApplyAllConfirmed)
            }
            ReviewEvent::Cancel => {
                self.state = ReviewState::Browsing;
                Step::Continue
            }
            _ => Step::Continue,
        }
    }

    fn handle_rejecting(&mut self, path: String, event: ReviewEvent) -> Step {
        match event {
            ReviewEvent::RejectSucceeded => {
                self.change_set.remove_path(&path);
                self.just_rejected_file = true;
                self.last_reject_error = None;
                debug!(%path, remaining = self.change_set.len(), "file rejected");

                if self.change_set.is_empty() {
                    self.cursor = 0;
                    return self.finish(TerminalCause::AllFilesRejected);
                }
                self.cursor = self.cursor.min(self.last_index());
                self.state = ReviewState::Browsing;
                Step::Continue
            }
            ReviewEvent::RejectFailed(err) => {
                self.last_reject_error = Some(err);
                self.finish(TerminalCause::RejectFailed)
            }
            _ => Step::Continue,
        }
    }

    fn finish(&mut self, cause: TerminalCause) -> Step {
        debug!(?cause, remaining = self.change_set.len(), "review session finished");
        self.state = ReviewState::Terminal(cause);
        Step::Finished(cause)
    }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs()).min(self.last_index())
        };
    }

    fn last_index(&self) -> usize {
        self.change_set.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(paths: &[&str]) -> ReviewSession {
        ReviewSession::new(PlanChangeSet::new(paths.iter().copied()))
    }

    fn reject_selected(s: &mut ReviewSession) -> Step {
        match s.handle(ReviewEvent::RequestReject) {
            Step::Reject(_) => s.handle(ReviewEvent::RejectSucceeded),
            other => panic!("expected reject step, got {other:?}"),
        }
    }

    #[test]
    fn navigation_clamps_and_never_terminates() {
        let mut s = session(&["a.go", "b.go", "c.go"]);
        let before = s.change_set().clone();

        let moves = [1, 1, 1, 5, -1, -10, 2, 100, -3, 0, 1];
        for delta in moves {
            assert_eq!(s.handle(ReviewEvent::Move(delta)), Step::Continue);
            assert!(s.cursor() < s.change_set().len());
            assert_eq!(s.state(), &ReviewState::Browsing);
        }
        s.handle(ReviewEvent::MoveLast);
        assert_eq!(s.cursor(), 2);
        s.handle(ReviewEvent::Move(1));
        assert_eq!(s.cursor(), 2, "moving past the last file stays on it");
        s.handle(ReviewEvent::MoveFirst);
        s.handle(ReviewEvent::Move(-1));
        assert_eq!(s.cursor(), 0);

        assert_eq!(s.change_set(), &before);
        assert!(!s.is_terminal());
    }

    #[test]
    fn reject_removes_one_entry_and_keeps_order() {
        let mut s = session(&["a.go", "b.go", "c.go", "d.go"]);
        s.handle(ReviewEvent::Move(1));

        assert_eq!(reject_selected(&mut s), Step::Continue);
        assert_eq!(s.change_set().paths(), ["a.go", "c.go", "d.go"]);
        assert!(s.just_rejected_file());
        assert_eq!(s.selected_path(), Some("c.go"));

        s.handle(ReviewEvent::MoveLast);
        assert!(!s.just_rejected_file(), "flag only survives one transition");
        assert_eq!(reject_selected(&mut s), Step::Continue);
        assert_eq!(s.change_set().paths(), ["a.go", "c.go"]);
        assert_eq!(s.cursor(), 1, "cursor clamps after removing the last entry");
    }

    #[test]
    fn reject_request_carries_the_path_under_the_cursor() {
        let mut s = session(&["a.go", "b.go"]);
        s.handle(ReviewEvent::Move(1));
        assert_eq!(s.handle(ReviewEvent::RequestReject), Step::Reject("b.go".to_owned()));
        assert_eq!(
            s.state(),
            &ReviewState::Rejecting {
                path: "b.go".to_owned()
            }
        );

        // Navigation is ignored while the reject is in flight.
        assert_eq!(s.handle(ReviewEvent::Move(-1)), Step::Continue);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn rejecting_every_file_in_turn_ends_with_all_rejected() {
        let mut s = session(&["a.go", "b.go", "c.go"]);
        for expected_len in [2, 1] {
            assert_eq!(reject_selected(&mut s), Step::Continue);
            assert_eq!(s.change_set().len(), expected_len);
        }
        assert_eq!(
            reject_selected(&mut s),
            Step::Finished(TerminalCause::AllFilesRejected)
        );
        assert!(s.just_rejected_file());
        assert!(!s.apply_all_requested());
        assert!(s.change_set().is_empty());
    }

    #[test]
    fn reject_failure_is_terminal_regardless_of_remaining_files() {
        for paths in [&["a.go"][..], &["a.go", "b.go", "c.go"][..]] {
            let mut s = session(paths);
            s.handle(ReviewEvent::RequestReject);
            let step = s.handle(ReviewEvent::RejectFailed(RejectError::new("server error")));

            assert_eq!(step, Step::Finished(TerminalCause::RejectFailed));
            assert_eq!(s.last_reject_error().map(|e| e.msg.as_str()), Some("server error"));
            assert!(!s.apply_all_requested());
            assert_eq!(s.change_set().len(), paths.len());
        }
    }

    #[test]
    fn confirm_apply_all_sets_flag_and_keeps_change_set() {
        let mut s = session(&["a.go", "b.go"]);
        let before = s.change_set().clone();
        s.handle(ReviewEvent::RequestApplyAll);
        assert_eq!(s.state(), &ReviewState::ConfirmingApplyAll);

        let step = s.handle(ReviewEvent::Confirm);
        assert_eq!(step, Step::Finished(TerminalCause::ApplyAllConfirmed));
        assert!(s.apply_all_requested());
        assert!(s.last_reject_error().is_none());
        assert_eq!(s.change_set(), &before);
    }

    #[test]
    fn cancel_confirmation_returns_to_browsing_with_cursor_intact() {
        let mut s = session(&["a.go", "b.go", "c.go"]);
        s.handle(ReviewEvent::Move(2));
        s.handle(ReviewEvent::RequestApplyAll);
        s.handle(ReviewEvent::Move(-1));
        assert_eq!(s.handle(ReviewEvent::Cancel), Step::Continue);
        assert_eq!(s.state(), &ReviewState::Browsing);
        assert_eq!(s.cursor(), 2);
        assert!(!s.apply_all_requested());
    }

    #[test]
    fn quit_from_any_live_state_is_user_quit() {
        let setups: [fn(&mut ReviewSession); 4] = [
            |_| {},
            |s| {
                s.handle(ReviewEvent::RequestApplyAll);
            },
            |s| {
                s.handle(ReviewEvent::RequestReject);
            },
            |s| {
                s.handle(ReviewEvent::RequestReject);
                s.handle(ReviewEvent::RejectSucceeded);
            },
        ];
        for setup in setups {
            let mut s = session(&["a.go", "b.go"]);
            setup(&mut s);
            assert_eq!(s.handle(ReviewEvent::Quit), Step::Finished(TerminalCause::UserQuit));
            assert!(!s.apply_all_requested());
            assert!(!s.just_rejected_file());
        }
    }

    #[test]
    fn terminal_session_ignores_further_events() {
        let mut s = session(&["a.go"]);
        s.handle(ReviewEvent::Quit);
        assert_eq!(
            s.handle(ReviewEvent::RequestApplyAll),
            Step::Finished(TerminalCause::UserQuit)
        );
        assert_eq!(s.handle(ReviewEvent::Confirm), Step::Finished(TerminalCause::UserQuit));
        assert!(!s.apply_all_requested());
    }

    #[test]
    fn empty_session_ignores_reject_and_apply_requests() {
        let mut s = session(&[]);
        assert_eq!(s.handle(ReviewEvent::RequestReject), Step::Continue);
        assert_eq!(s.handle(ReviewEvent::RequestApplyAll), Step::Continue);
        assert_eq!(s.state(), &ReviewState::Browsing);
        assert_eq!(s.handle(ReviewEvent::Quit), Step::Finished(TerminalCause::UserQuit));
        assert_eq!(s.into_outcome(), Some(ReviewOutcome::NothingPending));
    }

    #[test]
    fn running_session_has_no_outcome() {
        assert_eq!(session(&["a.go"]).into_outcome(), None);
    }
}
