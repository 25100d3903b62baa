//! Confirmation dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::{ConfirmKind, PendingConfirm};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a confirmation dialog for submit or quit
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingConfirm) {
    let accent = match pending.kind {
        ConfirmKind::Submit => Color::Green,
        ConfirmKind::Quit => Color::Red,
    };

    // Cancel first, so the safe choice sits on top
    let options = [
        (false, "Cancel", Color::White),
        (true, pending.kind.confirm_label(), accent),
    ];
    let option_lines = options
        .into_iter()
        .map(|(value, label, color)| {
            let is_selected = pending.selected_option == value;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    let hint = vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: pending.kind.title(),
            accent,
            message: &pending.message,
            extra_lines: option_lines,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
