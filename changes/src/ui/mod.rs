//! UI rendering for the review screen.
//!
//! `render()` is the single entry point called by the runner inside
//! `terminal.draw()`. Layout arithmetic lives in `layout.rs`, the file list in
//! `file_list.rs`, modal dialogs in `dialog.rs` and `help.rs`.

mod dialog;
pub mod file_list;
pub mod help;
pub mod keybindings;
mod layout;

use changes_core::ReviewState;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: file list, status bar, and any dialog on top.
///
/// The list's inner height is cached into `state` before drawing so the next
/// PageUp / PageDown moves by exactly one screen.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [list_area, status_bar] = compute_layout(frame);

    state.file_list_viewport_height = inner_rect(list_area).height;
    state.sync_selection();

    file_list::render_file_list(frame, list_area, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    match state.session.state() {
        ReviewState::ConfirmingApplyAll => {
            dialog::render_confirm_apply(frame, theme, state.session.change_set().len());
        }
        ReviewState::Rejecting { path } => dialog::render_rejecting(frame, theme, path),
        ReviewState::Browsing | ReviewState::Terminal(_) => {}
    }

    // Help overlay goes last so it sits on top.
    if state.show_help {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
