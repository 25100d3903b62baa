//! Application state and core logic

use crate::config::WizardConfig;
use crate::platform::has_step_modifier;
use crate::state::{
    ActionButton, AppState, ConfirmKind, EntryIdGenerator, OnboardingSubmission, PendingConfirm,
    UuidIds, Wizard, WizardError,
};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Id source for new list entries
    ids: Box<dyn EntryIdGenerator>,
    /// Date used as the starting point for empty date fields
    clock: fn() -> NaiveDate,
    /// Whether the app should quit
    quit: bool,
    /// Records handed out by a confirmed submit
    submission: Option<OnboardingSubmission>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &WizardConfig) -> Self {
        Self::with_id_generator(config, Box::new(UuidIds))
    }

    pub fn with_id_generator(config: &WizardConfig, ids: Box<dyn EntryIdGenerator>) -> Self {
        let wizard = Wizard::new(config.keep_step_data(), config.start_step());
        Self {
            state: AppState::new(wizard),
            ids,
            clock: local_today,
            quit: false,
            submission: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Take the confirmed submission, if any
    pub fn take_submission(&mut self) -> Option<OnboardingSubmission> {
        self.submission.take()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle confirmation dialog (modal)
        if self.state.pending_confirm.is_some() {
            self.handle_confirm_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        // Step shortcuts (work from anywhere)
        if has_step_modifier(key.modifiers) {
            match key.code {
                KeyCode::Char('n') => self.go_next(),
                KeyCode::Char('p') => self.go_prev(),
                KeyCode::Char('s') => self.request_submit(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => {
                self.state.pending_confirm = Some(PendingConfirm::new(
                    ConfirmKind::Quit,
                    "Quit without submitting? Entered data will be lost.",
                ));
            }
            KeyCode::Tab => self.state.wizard.active_form_mut().next_field(),
            KeyCode::BackTab => self.state.wizard.active_form_mut().prev_field(),
            _ if self.state.wizard.active_form().is_actions_row_active() => {
                self.handle_actions_row_key(key)
            }
            _ => self.handle_field_key(key),
        }
        Ok(())
    }

    /// Keys while the actions row is focused
    fn handle_actions_row_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.prev_button(),
            KeyCode::Right | KeyCode::Char('l') => self.state.next_button(),
            KeyCode::Up | KeyCode::Char('k') => self.state.wizard.active_form_mut().prev_field(),
            KeyCode::Down | KeyCode::Char('j') => self.state.wizard.active_form_mut().next_field(),
            KeyCode::Enter => {
                if let Some(button) = self.state.selected_action() {
                    self.press(button);
                }
            }
            _ => {}
        }
    }

    /// Keys while a form field is focused
    fn handle_field_key(&mut self, key: KeyEvent) {
        let today = (self.clock)();
        let form = self.state.wizard.active_form_mut();
        match key.code {
            KeyCode::Up => {
                if !form.move_up() {
                    form.prev_field();
                }
            }
            KeyCode::Down => {
                if !form.move_down() {
                    form.next_field();
                }
            }
            KeyCode::Left => form.step_value(-1, today),
            KeyCode::Right => form.step_value(1, today),
            KeyCode::PageUp => form.step_months(-1, today),
            KeyCode::PageDown => form.step_months(1, today),
            KeyCode::Home => form.jump_to_extreme(false),
            KeyCode::End => form.jump_to_extreme(true),
            KeyCode::Delete => form.clear_active(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if !form.activate(self.ids.as_mut()) {
                    form.next_field();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => form.input_char(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_confirm.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                pending.selected_option = !pending.selected_option;
            }
            KeyCode::Char('y') => {
                pending.selected_option = true;
                self.confirm();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.state.pending_confirm = None,
            KeyCode::Enter => {
                if pending.selected_option {
                    self.confirm();
                } else {
                    self.state.pending_confirm = None;
                }
            }
            _ => {}
        }
    }

    fn confirm(&mut self) {
        let Some(pending) = self.state.pending_confirm.take() else {
            return;
        };
        match pending.kind {
            ConfirmKind::Quit => self.quit = true,
            ConfirmKind::Submit => match self.state.wizard.submit() {
                Ok(submission) => {
                    self.submission = Some(submission);
                    self.quit = true;
                }
                Err(err) => self.report_submit_error(err),
            },
        }
    }

    fn press(&mut self, button: ActionButton) {
        match button {
            ActionButton::Back => self.go_prev(),
            ActionButton::Next => self.go_next(),
            ActionButton::Submit => self.request_submit(),
        }
    }

    fn go_next(&mut self) {
        if self.state.wizard.next() {
            self.state.reset_selected_button();
        }
    }

    fn go_prev(&mut self) {
        if self.state.wizard.prev() {
            self.state.reset_selected_button();
        }
    }

    /// Validate and ask for confirmation before submitting
    fn request_submit(&mut self) {
        match self.state.wizard.submit() {
            Ok(submission) => {
                let company = submission.basic_information.company_name.trim();
                let message = if company.is_empty() {
                    "Submit the onboarding settings?".to_string()
                } else {
                    format!("Submit the onboarding settings for {company}?")
                };
                self.state.pending_confirm = Some(PendingConfirm::new(ConfirmKind::Submit, message));
            }
            Err(err) => self.report_submit_error(err),
        }
    }

    fn report_submit_error(&mut self, err: WizardError) {
        match err {
            WizardError::NotOnLastStep { .. } => {
                self.state.status_message = Some(err.to_string());
            }
            WizardError::Invalid(ref errors) => {
                let details: Vec<String> = errors.iter().map(|e| format!("- {e}")).collect();
                self.state
                    .push_error(format!("{err}:\n{}", details.join("\n")));
            }
        }
    }
}
