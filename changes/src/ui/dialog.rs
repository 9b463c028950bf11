//! Modal dialogs drawn over the file list.
//!
//! Both dialogs use the same `Clear` + bordered `Paragraph` approach as the
//! help overlay.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the apply-all confirmation for `file_count` pending files.
pub fn render_confirm_apply(frame: &mut Frame, theme: &Theme, file_count: usize) {
    let area = dialog_area(frame.area());
    frame.render_widget(Clear, area);

    let noun = if file_count == 1 { "file" } else { "files" };
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Apply changes to {file_count} {noun}?"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.confirm).add_modifier(Modifier::BOLD)),
            Span::raw(" apply all    "),
            Span::styled("n", Style::default().fg(theme.reject).add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]),
    ]);

    let block = Block::bordered()
        .title(" Apply all ")
        .border_style(Style::default().fg(theme.confirm));

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Renders the notice shown while a reject for `path` is in flight.
pub fn render_rejecting(frame: &mut Frame, theme: &Theme, path: &str) {
    let area = dialog_area(frame.area());
    frame.render_widget(Clear, area);

    let text = Text::from(vec![
        Line::from(""),
        Line::from(format!("Rejecting {path}…")),
        Line::from(""),
        Line::from(Span::styled("Ctrl-c to quit", Style::default().fg(theme.hint))),
    ]);

    let block = Block::bordered()
        .title(" Reject ")
        .border_style(Style::default().fg(theme.reject));

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Fixed-height box centred in `area`, 60% wide.
fn dialog_area(area: Rect) -> Rect {
    area.centered(Constraint::Percentage(60), Constraint::Length(6))
}
