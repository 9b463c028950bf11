//! Help overlay renderer.
//!
//! Draws a centred modal over the file list using ratatui's `Clear` widget to
//! erase the background first, inside the same `terminal.draw()` closure.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled vertically by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(70));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Navigation"),
        Line::from("  j / k  ↓ / ↑      Next / previous file"),
        Line::from("  g / G  Home/End   First / last file"),
        Line::from("  PgDn / PgUp       Move one page"),
        Line::from(""),
        Line::from("Changes"),
        Line::from("  r / d             Reject the selected file's change"),
        Line::from("  a                 Apply all pending changes (asks to confirm)"),
        Line::from(""),
        Line::from("Confirmation"),
        Line::from("  y / Enter         Apply all"),
        Line::from("  n / Esc           Back to the file list"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?                 Open / close this help overlay"),
        Line::from("  q / Esc           Quit, leaving changes pending"),
        Line::from("  Ctrl-c            Quit from anywhere"),
    ])
}
