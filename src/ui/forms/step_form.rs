//! Generic rendering of the active step's form and its actions row

use super::field_renderer::{draw_field, field_height, FieldProps};
use crate::app::App;
use crate::state::{FieldSpec, FieldValue, Form, STEPS};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT, BUTTON_WIDTH};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// One field as laid out on screen
struct FormRow {
    index: usize,
    spec: FieldSpec,
    value: FieldValue,
    /// Section heading drawn above the field when the section changes
    heading: Option<&'static str>,
}

impl FormRow {
    fn height(&self) -> u16 {
        field_height(&self.value) + u16::from(self.heading.is_some())
    }
}

fn form_rows(form: &dyn Form) -> Vec<FormRow> {
    let mut rows = Vec::new();
    let mut section = "";
    for index in 0..form.field_count() {
        let Some((spec, value)) = form.get_field(index) else {
            continue;
        };
        let heading = (spec.section != section && !spec.section.is_empty()).then_some(spec.section);
        section = spec.section;
        rows.push(FormRow {
            index,
            spec,
            value,
            heading,
        });
    }
    rows
}

/// Rows to draw so the active one is visible, preferring to start at the top
pub fn visible_window(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    let mut used: u16 = heights[..=active].iter().sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }

    let mut end = active + 1;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    start..end
}

/// Draw the current step: title, fields and the actions row
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.state.wizard;
    let form = wizard.active_form();
    let actions_focused = form.is_actions_row_active();

    let border_color = if actions_focused {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(format!(
            " {} ({}/{}) ",
            wizard.step().title,
            wizard.state().current() + 1,
            STEPS.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Actions row
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_fields(frame, chunks[0], form);
    draw_actions(frame, chunks[1], app);
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &dyn Form) {
    let rows = form_rows(form);
    let heights: Vec<u16> = rows.iter().map(FormRow::height).collect();
    let window = visible_window(&heights, form.active_field(), area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for row in &rows[window] {
        if let Some(heading) = row.heading {
            if y >= bottom {
                break;
            }
            let heading_area = Rect::new(area.x, y, area.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    heading,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                heading_area,
            );
            y += 1;
        }

        let height = field_height(&row.value).min(bottom.saturating_sub(y));
        if height == 0 {
            break;
        }
        let is_active = row.index == form.active_field();
        let error = form.field_error(row.index);
        let props = FieldProps {
            spec: &row.spec,
            value: &row.value,
            is_active,
            list_row: if is_active { form.list_row() } else { 0 },
            error: error.as_ref(),
        };
        draw_field(frame, Rect::new(area.x, y, area.width, height), &props);
        y += height;
    }
}

fn draw_actions(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.wizard.active_form();
    let buttons = app.state.action_buttons();

    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(buttons.iter().map(|_| Constraint::Length(BUTTON_WIDTH)));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(1)
        .split(area);

    // Summary of the step's inline errors, left of the buttons
    let errors = form.validate().len();
    if errors > 0 {
        let summary = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("⚠ {errors} field(s) need attention"),
                Style::default().fg(Color::Red),
            )),
        ]);
        frame.render_widget(summary, chunks[0]);
    }

    let actions_focused = form.is_actions_row_active();
    for (index, button) in buttons.iter().enumerate() {
        render_action_button(
            frame,
            chunks[index + 1],
            button.label(),
            app.state.selected_button == index,
            actions_focused,
        );
    }
}
