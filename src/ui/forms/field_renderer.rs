//! Field rendering utilities for forms
//!
//! One draw function per field primitive. Every primitive is a bordered block
//! titled with the field label; the border turns cyan while the field has focus
//! and red while its value breaks the field's constraint.

use crate::state::{FieldKind, FieldSpec, FieldValue, ListField, ValidationError};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Height of a single-line field (border + value + border)
pub const FIELD_HEIGHT: u16 = 3;

/// Visible rows of a list field before it scrolls
pub const MAX_LIST_ROWS: u16 = 6;

const CURSOR: &str = "▌";

/// Everything needed to draw one field
pub struct FieldProps<'a> {
    pub spec: &'a FieldSpec,
    pub value: &'a FieldValue,
    pub is_active: bool,
    /// Focused row when the field is a list
    pub list_row: usize,
    pub error: Option<&'a ValidationError>,
}

/// Rows the field occupies
pub fn field_height(value: &FieldValue) -> u16 {
    match value.as_list() {
        Some(list) => list_rows(list).min(MAX_LIST_ROWS) + 2,
        None => FIELD_HEIGHT,
    }
}

/// Entry rows plus the add row while more entries fit
fn list_rows(list: &ListField) -> u16 {
    (list.len() + 1) as u16
}

/// Draw a field with the primitive matching its kind
pub fn draw_field(frame: &mut Frame, area: Rect, props: &FieldProps) {
    match props.spec.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Number { .. } => {
            draw_text_field(frame, area, props)
        }
        FieldKind::Select => draw_select_field(frame, area, props),
        FieldKind::Date | FieldKind::Time => draw_picker_field(frame, area, props),
        FieldKind::Range { min, max } => draw_range_field(frame, area, props, min, max),
        FieldKind::MultiInput => draw_list_field(frame, area, props),
    }
}

fn field_block<'a>(props: &FieldProps<'a>) -> Block<'a> {
    let border_color = if props.error.is_some() {
        Color::Red
    } else if props.is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut block = Block::default()
        .title(format!(" {} ", props.spec.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    // Inline error wins over help text
    if let Some(error) = props.error {
        block = block.title_bottom(Span::styled(
            format!(" {} ", error_text(error)),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(help) = props.spec.help_text {
        block = block.title_bottom(Span::styled(
            format!(" {help} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    block
}

/// Error text without the leading field name, which the block title already shows
fn error_text(error: &ValidationError) -> String {
    let text = error.to_string();
    let prefix = format!("{}: ", error.field());
    text.strip_prefix(&prefix).unwrap_or(&text).to_string()
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn placeholder_span(text: &str) -> Span<'_> {
    Span::styled(
        text,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )
}

/// Single line text input with a cursor while focused
pub fn draw_text_field(frame: &mut Frame, area: Rect, props: &FieldProps) {
    let value = props.value.display_value();
    let cursor = Span::styled(CURSOR, Style::default().fg(Color::Cyan));
    let spans = match (value.is_empty(), props.is_active) {
        (false, false) => vec![Span::styled(value, value_style(false))],
        (false, true) => vec![Span::styled(value, value_style(true)), cursor],
        (true, true) => {
            let mut spans = vec![cursor];
            spans.extend(props.spec.placeholder.map(placeholder_span));
            spans
        }
        (true, false) => vec![placeholder_span(props.spec.placeholder.unwrap_or("(empty)"))],
    };

    // Keep the end of the value and the cursor in view while typing
    let line = Line::from(spans);
    let inner_width = area.width.saturating_sub(2);
    let overflow = if props.is_active {
        u16::try_from(line.width())
            .unwrap_or(u16::MAX)
            .saturating_sub(inner_width)
    } else {
        0
    };

    frame.render_widget(
        Paragraph::new(line)
            .block(field_block(props))
            .scroll((0, overflow)),
        area,
    );
}

/// Option strip with the selected option marked
pub fn draw_select_field(frame: &mut Frame, area: Rect, props: &FieldProps) {
    let Some((labels, selected)) = props.value.options() else {
        return draw_text_field(frame, area, props);
    };

    let mut spans = Vec::new();
    for (index, label) in labels.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        if index == selected {
            spans.push(Span::styled(
                format!("(•) {label}"),
                value_style(props.is_active).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!("( ) {label}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    if props.is_active {
        spans.push(Span::styled("   ←→", Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(field_block(props)), area);
}

/// Date and time pickers: the value between step arrows
pub fn draw_picker_field(frame: &mut Frame, area: Rect, props: &FieldProps) {
    let value = props.value.display_value();
    let mut spans = Vec::new();
    if props.is_active {
        spans.push(Span::styled("◂ ", Style::default().fg(Color::Cyan)));
    }
    if value.is_empty() {
        spans.push(placeholder_span(props.spec.placeholder.unwrap_or("(not set)")));
    } else {
        spans.push(Span::styled(value, value_style(props.is_active)));
    }
    if props.is_active {
        spans.push(Span::styled(" ▸", Style::default().fg(Color::Cyan)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(field_block(props)), area);
}

/// Range slider with the value label, e.g. "45 days" or "Unlimited"
pub fn draw_range_field(frame: &mut Frame, area: Rect, props: &FieldProps, min: u16, max: u16) {
    let FieldValue::Expiration(expiration) = props.value else {
        return draw_text_field(frame, area, props);
    };

    let span = f64::from(max.saturating_sub(min).max(1));
    let ratio = f64::from(expiration.position().saturating_sub(min)) / span;
    let gauge = LineGauge::default()
        .block(field_block(props))
        .filled_style(value_style(props.is_active).add_modifier(Modifier::BOLD))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .label(format!("{:>9} ", expiration.label()))
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

/// List of text entries followed by an add row
pub fn draw_list_field(frame: &mut Frame, area: Rect, props: &FieldProps) {
    let Some(list) = props.value.as_list() else {
        return draw_text_field(frame, area, props);
    };

    let mut items: Vec<ListItem> = list
        .entries()
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            let is_row_active = props.is_active && props.list_row == row;
            let mut spans = vec![Span::styled(
                format!("{:>2}. ", row + 1),
                Style::default().fg(Color::DarkGray),
            )];
            if entry.value.is_empty() && !is_row_active {
                spans.push(placeholder_span(props.spec.placeholder.unwrap_or("(empty)")));
            } else {
                spans.push(Span::styled(entry.value.clone(), value_style(is_row_active)));
            }
            if is_row_active {
                spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let count = format!("{}/{}", list.len(), list.max());
    let add_row = if list.can_add() {
        let is_row_active = props.is_active && props.list_row == list.len();
        let style = if is_row_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Line::from(Span::styled(format!("  + Add ({count})"), style))
    } else {
        Line::from(Span::styled(
            format!("  Maximum reached ({count})"),
            Style::default().fg(Color::DarkGray),
        ))
    };
    items.push(ListItem::new(add_row));

    // Keeps the focused row in view once the list scrolls
    let selected = if props.is_active { props.list_row } else { 0 };
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(
        List::new(items).block(field_block(props)),
        area,
        &mut list_state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        IntegerInput, ListFieldEntry, PasswordExpiration, Plan, PASSWORD_EXPIRATION_MAX,
        PASSWORD_EXPIRATION_MIN,
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn render(width: u16, height: u16, props: &FieldProps) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw_field(frame, frame.area(), props))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn props<'a>(spec: &'a FieldSpec, value: &'a FieldValue) -> FieldProps<'a> {
        FieldProps {
            spec,
            value,
            is_active: false,
            list_row: 0,
            error: None,
        }
    }

    mod height {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_line_fields() {
            assert_eq!(field_height(&FieldValue::Text(String::new())), FIELD_HEIGHT);
            assert_eq!(
                field_height(&FieldValue::Expiration(PasswordExpiration::Unlimited)),
                FIELD_HEIGHT
            );
        }

        #[test]
        fn test_list_grows_then_scrolls() {
            let list = ListField::seeded(20);
            assert_eq!(field_height(&FieldValue::List(list)), 4);

            let entries = (1..=10)
                .map(|i| ListFieldEntry::new(i.to_string(), "x"))
                .collect();
            let list = ListField::with_entries(20, entries);
            assert_eq!(field_height(&FieldValue::List(list)), MAX_LIST_ROWS + 2);
        }
    }

    mod text {
        use super::*;

        #[test]
        fn test_empty_inactive_shows_placeholder() {
            let spec = FieldSpec::new("companyName", "Company name", "", FieldKind::Text)
                .placeholder("e.g. Acme KK");
            let value = FieldValue::Text(String::new());
            let lines = render(30, 3, &props(&spec, &value));
            assert!(lines[0].contains("Company name"));
            assert!(lines[1].contains("e.g. Acme KK"));
        }

        #[test]
        fn test_active_shows_value_and_cursor() {
            let spec = FieldSpec::new("companyName", "Company name", "", FieldKind::Text);
            let value = FieldValue::Text("Acme".to_string());
            let mut p = props(&spec, &value);
            p.is_active = true;
            let lines = render(30, 3, &p);
            assert!(lines[1].contains("Acme▌"));
        }

        #[test]
        fn test_long_active_value_scrolls_to_cursor() {
            let spec = FieldSpec::new("companyName", "Company name", "", FieldKind::Text);
            let value = FieldValue::Text("abcdefghijklmnop".to_string());
            let mut p = props(&spec, &value);
            p.is_active = true;
            let lines = render(12, 3, &p);
            assert!(lines[1].contains("mnop▌"));
            assert!(!lines[1].contains("abc"));

            p.is_active = false;
            let lines = render(12, 3, &p);
            assert!(lines[1].contains("abcdefghij"));
        }

        #[test]
        fn test_error_replaces_help_text() {
            let spec = FieldSpec::new(
                "alertThreshold",
                "Alert threshold",
                "",
                FieldKind::Number { min: 0 },
            )
            .help_text("Whole number");
            let value = FieldValue::Integer(IntegerInput::parse("ten"));
            let error = ValidationError::NotANumber {
                field: "Alert threshold",
                raw: "ten".to_string(),
            };
            let mut p = props(&spec, &value);
            p.error = Some(&error);
            let lines = render(40, 3, &p);
            assert!(lines[2].contains("\"ten\" is not a number"));
            assert!(!lines[2].contains("Whole number"));
        }
    }

    #[test]
    fn test_select_marks_selected_option() {
        let spec = FieldSpec::new("plan", "Plan", "", FieldKind::Select);
        let value = FieldValue::Plan(Plan::T);
        let lines = render(40, 3, &props(&spec, &value));
        assert!(lines[1].contains("(•) T"));
        assert!(lines[1].contains("( ) S"));
    }

    #[test]
    fn test_unset_date_shows_placeholder() {
        let spec = FieldSpec::new("startDate", "Start date", "", FieldKind::Date);
        let value = FieldValue::Date(None);
        let lines = render(30, 3, &props(&spec, &value));
        assert!(lines[1].contains("(not set)"));
    }

    #[test]
    fn test_range_shows_unlimited_label() {
        let spec = FieldSpec::new(
            "passwordExpiration",
            "Password expiration",
            "",
            FieldKind::Range {
                min: PASSWORD_EXPIRATION_MIN,
                max: PASSWORD_EXPIRATION_MAX,
            },
        );
        let value = FieldValue::Expiration(PasswordExpiration::Unlimited);
        let lines = render(40, 3, &props(&spec, &value));
        assert!(lines[1].contains("Unlimited"));

        let value = FieldValue::Expiration(PasswordExpiration::Days(45));
        let lines = render(40, 3, &props(&spec, &value));
        assert!(lines[1].contains("45 days"));
    }

    mod list {
        use super::*;

        #[test]
        fn test_entries_and_add_row() {
            let spec = FieldSpec::new("adminNames", "Administrators", "", FieldKind::MultiInput);
            let list = ListField::with_entries(20, vec![ListFieldEntry::new("1", "Taro Yamada")]);
            let value = FieldValue::List(list);
            let mut p = props(&spec, &value);
            p.is_active = true;
            let lines = render(40, 4, &p);
            assert!(lines[1].contains("1. Taro Yamada▌"));
            assert!(lines[2].contains("+ Add (1/20)"));
        }

        #[test]
        fn test_full_list_has_no_add_row() {
            let spec = FieldSpec::new("ccAddresses", "CC", "", FieldKind::MultiInput);
            let entries = (1..=2)
                .map(|i| ListFieldEntry::new(i.to_string(), "a@b.c"))
                .collect();
            let value = FieldValue::List(ListField::with_entries(2, entries));
            let lines = render(40, 5, &props(&spec, &value));
            assert!(lines[3].contains("Maximum reached (2/2)"));
        }
    }
}
