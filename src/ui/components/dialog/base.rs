//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    /// Dialog title
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Lines rendered below the message, e.g. selectable options
    pub extra_lines: Vec<Line<'a>>,
    /// Hint text shown at the bottom (e.g., "Press Enter to dismiss")
    pub hint: Option<Vec<Span<'a>>>,
    /// Maximum width of the dialog
    pub max_width: u16,
}

impl Default for DialogConfig<'_> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            accent: Color::White,
            message: "",
            extra_lines: Vec::new(),
            hint: None,
            max_width: 60,
        }
    }
}

/// Centered rectangle for a dialog of the given size, clamped to `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let padding = 4u16; // 2 chars padding on each side
    let max_line_width = config.max_width.saturating_sub(padding).max(1) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);

    let content_width = wrapped_lines
        .iter()
        .map(|l| l.width())
        .chain(config.extra_lines.iter().map(Line::width))
        .chain(config.hint.iter().map(|h| h.iter().map(Span::width).sum()))
        .max()
        .unwrap_or(0)
        .max(config.title.width()) as u16;
    let dialog_width = (content_width + padding + 2).min(config.max_width); // +2 for borders

    // Height: title + blank + message + (blank + extra) + (blank + hint) + borders
    let extra_rows = if config.extra_lines.is_empty() {
        0
    } else {
        config.extra_lines.len() as u16 + 1
    };
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let dialog_height = (2 + wrapped_lines.len() as u16 + extra_rows + hint_rows + 2).max(5);

    let dialog_area = centered_rect(frame.area(), dialog_width, dialog_height);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(Line::from));

    if !config.extra_lines.is_empty() {
        content.push(Line::from(""));
        content.extend(config.extra_lines);
    }

    if let Some(hint_spans) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// Wrap text to fit within a maximum display width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if !current_line.is_empty() && current_line.width() + word_width + 1 > max_width {
                lines.push(std::mem::take(&mut current_line));
            }
            if current_line.is_empty() && word_width > max_width {
                // Words without spaces (e.g. CJK runs) break between characters
                let mut pieces = split_by_width(word, max_width);
                current_line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                continue;
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

fn split_by_width(word: &str, max_width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0;
    for c in word.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0;
        }
        piece.push(c);
        width += char_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod wrap_text {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_breaks_on_word_boundaries() {
            assert_eq!(
                wrap_text("one two three four", 9),
                vec!["one two", "three", "four"]
            );
        }

        #[test]
        fn test_keeps_explicit_newlines() {
            assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        }

        #[test]
        fn test_empty_text_yields_one_line() {
            assert_eq!(wrap_text("", 10), vec![""]);
        }

        #[test]
        fn test_long_word_breaks_between_characters() {
            assert_eq!(
                wrap_text("abcdefghijkl", 5),
                vec!["abcde", "fghij", "kl"]
            );
        }

        #[test]
        fn test_wide_characters_count_double() {
            assert_eq!(wrap_text("ab 株式会社", 8), vec!["ab", "株式会社"]);
            assert_eq!(
                wrap_text("株式会社サンプル", 5),
                vec!["株式", "会社", "サン", "プル"]
            );
        }
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(area, 100, 30), area);
    }
}
