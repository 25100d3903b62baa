//! Layout components (step header, status bar)

use crate::app::App;
use crate::platform::{NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldKind, STEPS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Split the screen into step header, form body and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step header
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the step indicator with the current step highlighted
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.wizard.state().current();
    let titles = STEPS.iter().enumerate().map(|(index, step)| {
        let style = if index < current {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if index < current { "✓" } else { "" };
        Line::from(vec![
            Span::styled(format!("{}. {}", index + 1, step.title), style),
            Span::styled(marker, style),
        ])
    });

    let tabs = Tabs::new(titles)
        .select(current)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" › ", Style::default().fg(Color::DarkGray)))
        .block(
            Block::default()
                .title(" Onboarding ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(tabs, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    if let Some(message) = &app.state.status_message {
        spans.push(Span::styled(message, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(
        focus_hints(app),
        Style::default().fg(Color::Gray),
    ));

    // Tooltip of the focused field
    let form = app.state.wizard.active_form();
    if let Some(tooltip) = form
        .get_field(form.active_field())
        .and_then(|(spec, _)| spec.tooltip)
    {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("ⓘ {tooltip}"),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Step shortcuts on the right
    let shortcuts = step_shortcuts(app);
    let width = (shortcuts.chars().count() as u16).min(area.width);
    let shortcut_area = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: 1,
    };
    let shortcut_widget =
        Paragraph::new(shortcuts).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(shortcut_widget, shortcut_area);
}

fn step_shortcuts(app: &App) -> String {
    let step = app.state.wizard.state();
    let mut parts = Vec::new();
    if !step.is_first() {
        parts.push(format!("{PREV_STEP_SHORTCUT}:back"));
    }
    if step.is_last() {
        parts.push(format!("{SUBMIT_SHORTCUT}:submit"));
    } else {
        parts.push(format!("{NEXT_STEP_SHORTCUT}:next"));
    }
    parts.push("Esc:quit".to_string());
    format!(" {} ", parts.join("  "))
}

/// Keyboard hints for whatever currently has focus
fn focus_hints(app: &App) -> &'static str {
    let form = app.state.wizard.active_form();
    if form.is_actions_row_active() {
        return "←→:button  Enter:press  Tab:fields";
    }
    let kind = form
        .get_field(form.active_field())
        .map(|(spec, _)| spec.kind);
    match kind {
        Some(FieldKind::Text | FieldKind::Email) => "Tab:next  type to edit  Del:clear",
        Some(FieldKind::Number { .. }) => "Tab:next  type a number  Del:clear",
        Some(FieldKind::Select) => "Tab:next  ←→:change",
        Some(FieldKind::Date) => "Tab:next  ←→:day  PgUp/PgDn:month  Del:clear",
        Some(FieldKind::Time) => "Tab:next  ←→:hour",
        Some(FieldKind::Range { .. }) => "Tab:next  ←→:adjust  Home/End:min/max",
        Some(FieldKind::MultiInput) => "↑↓:row  Enter:add  Del:remove  Tab:next",
        None => "Tab:next",
    }
}
