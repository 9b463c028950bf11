//! Application state for the review screen.
//!
//! `AppState` pairs the [`ReviewSession`] (the review's real state machine)
//! with view-only state: the help overlay, the list widget's scroll state, the
//! last notice shown in the status bar, and viewport geometry cached from the
//! previous frame. View fields never influence review transitions.

use changes_core::{PlanRef, ReviewEvent, ReviewOutcome, ReviewSession};
use ratatui::widgets::ListState;

/// All mutable state passed through every render cycle.
pub struct AppState {
    /// The review being driven. Only the runner feeds events into it.
    pub session: ReviewSession,
    /// Plan and branch shown in the panel title.
    pub plan: PlanRef,

    /// True while the help overlay covers the file list.
    pub show_help: bool,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,

    /// Stateful list widget backing the file list. Selection mirrors the session cursor.
    pub file_list_state: ListState,
    /// Inner height of the file list after borders, cached after each render.
    /// Used as the PageUp / PageDown distance.
    pub file_list_viewport_height: u16,

    /// One-line message for the status bar, e.g. the last rejected path.
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(session: ReviewSession, plan: PlanRef) -> Self {
        let mut file_list_state = ListState::default();
        file_list_state.select(Some(session.cursor()));
        Self {
            session,
            plan,
            show_help: false,
            help_scroll: 0,
            file_list_state,
            file_list_viewport_height: 0,
            notice: None,
        }
    }

    /// Copies the session cursor into the list widget's selection.
    ///
    /// Called before every draw so the highlight always follows the session.
    pub fn sync_selection(&mut self) {
        let selected = if self.session.change_set().is_empty() {
            None
        } else {
            Some(self.session.cursor())
        };
        self.file_list_state.select(selected);
    }

    /// Number of rows a page key moves the cursor. At least 1.
    pub fn page_size(&self) -> isize {
        isize::try_from(self.file_list_viewport_height.max(1)).unwrap_or(isize::MAX)
    }

    /// Finishes the state and returns the review outcome.
    ///
    /// A session that is still live (the loop was torn down from outside) is
    /// closed as a user quit first.
    pub fn into_outcome(mut self) -> ReviewOutcome {
        self.session.handle(ReviewEvent::Quit);
        self.session
            .into_outcome()
            .unwrap_or(ReviewOutcome::NothingPending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use changes_core::{PlanChangeSet, TerminalCause};

    fn state(paths: &[&str]) -> AppState {
        let session = ReviewSession::new(PlanChangeSet::new(paths.iter().copied()));
        AppState::new(session, PlanRef::new("p", "main"))
    }

    #[test]
    fn selection_follows_session_cursor() {
        let mut app = state(&["a.go", "b.go", "c.go"]);
        assert_eq!(app.file_list_state.selected(), Some(0));
        app.session.handle(ReviewEvent::MoveLast);
        app.sync_selection();
        assert_eq!(app.file_list_state.selected(), Some(2));
    }

    #[test]
    fn page_size_is_never_zero() {
        let mut app = state(&["a.go"]);
        assert_eq!(app.page_size(), 1);
        app.file_list_viewport_height = 12;
        assert_eq!(app.page_size(), 12);
        app.file_list_viewport_height = u16::MAX;
        assert_eq!(app.page_size(), 65_535);
    }

    #[test]
    fn live_session_is_closed_as_quit() {
        let app = state(&["a.go"]);
        match app.into_outcome() {
            ReviewOutcome::Quit { change_set } => assert_eq!(change_set.paths(), ["a.go"]),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn terminal_session_keeps_its_cause() {
        let mut app = state(&["a.go"]);
        app.session.handle(ReviewEvent::RequestApplyAll);
        app.session.handle(ReviewEvent::Confirm);
        assert_eq!(app.session.terminal_cause(), Some(TerminalCause::ApplyAllConfirmed));
        assert!(matches!(app.into_outcome(), ReviewOutcome::ApplyAll { .. }));
    }
}
