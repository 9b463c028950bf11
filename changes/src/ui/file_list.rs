//! File list panel renderer.
//!
//! One row per pending path, in change-set order. The row under the session
//! cursor is highlighted; the file being rejected is marked while the round
//! trip is in flight.

use changes_core::ReviewState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the file list using `render_stateful_widget` so the `ListState`
/// selection highlight and scroll offset are applied.
///
/// The title shows the pending count and the plan/branch under review,
/// e.g. `Pending changes (3) · plan-1 @ main`.
pub fn render_file_list(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = matches!(state.session.state(), ReviewState::Browsing);
    let count = state.session.change_set().len();
    let title = format!(
        "Pending changes ({}) · {} @ {}",
        count, state.plan.plan_id, state.plan.branch
    );
    let block = panel_block(title, is_focused, theme);

    let rejecting = match state.session.state() {
        ReviewState::Rejecting { path } => Some(path.as_str()),
        _ => None,
    };

    let items: Vec<ListItem> = if count == 0 {
        vec![ListItem::new(Line::raw("No changes pending"))]
    } else {
        state
            .session
            .change_set()
            .paths()
            .iter()
            .map(|path| path_item(path, rejecting == Some(path.as_str()), theme))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(theme.selection)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, area, &mut state.file_list_state);
}

/// Converts a pending path into a styled row: `[M] src/main.rs`, or
/// `[…] src/main.rs  rejecting` while its reject is in flight.
fn path_item(path: &str, rejecting: bool, theme: &Theme) -> ListItem<'static> {
    let (badge, color) = if rejecting {
        ("[…] ", theme.reject)
    } else {
        ("[M] ", theme.file_pending)
    };
    let mut spans = vec![
        Span::styled(badge, Style::default().fg(color)),
        Span::raw(path.to_owned()),
    ];
    if rejecting {
        spans.push(Span::styled("  rejecting", Style::default().fg(theme.reject)));
    }
    ListItem::new(Line::from(spans))
}
