//! Layout arithmetic and shared widgets for the review screen.
//!
//! Pure layout: called inside `terminal.draw()` on every render so each frame
//! reflects the current terminal size. No state is stored here.

use changes_core::ReviewState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::AppState;
use crate::theme::Theme;

/// Returns `[file_list, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 2] {
    Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area())
}

/// Inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Bordered `Block` for a panel.
///
/// `BorderType::Thick` when the panel has focus, `BorderType::Plain` when a
/// dialog sits on top of it.
pub fn panel_block<'a>(title: String, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Shows a mode indicator, then either the current notice or the key hints
/// for the current state. Never renders blank.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg, hints) = match state.session.state() {
        ReviewState::Browsing => (
            " BROWSE ",
            theme.status_mode_browse,
            "j/k move  r reject  a apply all  ? help  q quit",
        ),
        ReviewState::ConfirmingApplyAll => {
            (" CONFIRM ", theme.status_mode_busy, "y apply all  n cancel")
        }
        ReviewState::Rejecting { .. } => {
            (" REJECTING ", theme.status_mode_busy, "waiting for server  Ctrl-c quit")
        }
        ReviewState::Terminal(_) => (" DONE ", theme.status_mode_browse, ""),
    };

    let mode_span = Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    );
    let detail = match &state.notice {
        Some(notice) => Span::raw(format!(" {notice}")),
        None => Span::raw(format!(" {hints}")),
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![mode_span, detail]))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
