//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Button width in columns for the actions row
pub const BUTTON_WIDTH: u16 = 12;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.centered().block(block), area);
}

/// Render a wizard action button; the selection only shows while the actions row has focus
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_row_focused: bool,
) {
    render_button(frame, area, label, is_selected && is_row_focused, is_selected);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_selected_button_is_cyan() {
        let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();
        terminal
            .draw(|frame| render_action_button(frame, frame.area(), "Next", true, true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0u16, 0u16)].fg, Color::Cyan);
        let text: String = (0..12u16).map(|x| buffer[(x, 1u16)].symbol()).collect();
        assert!(text.contains("Next"));
    }

    #[test]
    fn test_unfocused_row_dims_selection() {
        let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();
        terminal
            .draw(|frame| render_action_button(frame, frame.area(), "Next", true, false))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(0u16, 0u16)].fg, Color::DarkGray);
    }
}
