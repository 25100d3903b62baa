//! Application state definitions

use super::wizard::Wizard;

/// Buttons on the wizard's actions row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Back,
    Next,
    Submit,
}

impl ActionButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Next => "Next",
            Self::Submit => "Submit",
        }
    }
}

/// What a confirmation dialog is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    Submit,
    Quit,
}

impl ConfirmKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Submit => "Submit Onboarding",
            Self::Quit => "Quit",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Quit => "Quit",
        }
    }
}

/// Pending confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub kind: ConfirmKind,
    /// Text shown in the dialog body
    pub message: String,
    /// true = confirm, false = cancel
    pub selected_option: bool,
}

impl PendingConfirm {
    pub fn new(kind: ConfirmKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            selected_option: false,
        }
    }
}

/// Main application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub wizard: Wizard,
    /// Selected button on the actions row
    pub selected_button: usize,
    /// Error messages waiting to be shown, oldest first
    pub error_queue: Vec<String>,
    pub pending_confirm: Option<PendingConfirm>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(wizard: Wizard) -> Self {
        let mut state = Self {
            wizard,
            ..Default::default()
        };
        state.reset_selected_button();
        state
    }

    /// Buttons offered on the current step: no Back on the first, Submit only on the last
    pub fn action_buttons(&self) -> Vec<ActionButton> {
        let step = self.wizard.state();
        let mut buttons = Vec::with_capacity(2);
        if !step.is_first() {
            buttons.push(ActionButton::Back);
        }
        if step.is_last() {
            buttons.push(ActionButton::Submit);
        } else {
            buttons.push(ActionButton::Next);
        }
        buttons
    }

    pub fn selected_action(&self) -> Option<ActionButton> {
        self.action_buttons().get(self.selected_button).copied()
    }

    /// Select the primary (rightmost) button
    pub fn reset_selected_button(&mut self) {
        self.selected_button = self.action_buttons().len().saturating_sub(1);
    }

    pub fn next_button(&mut self) {
        let count = self.action_buttons().len();
        self.selected_button = (self.selected_button + 1) % count;
    }

    pub fn prev_button(&mut self) {
        let count = self.action_buttons().len();
        self.selected_button = (self.selected_button + count - 1) % count;
    }

    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod action_buttons {
        use super::*;

        #[test]
        fn test_first_step_offers_only_next() {
            let state = AppState::new(Wizard::default());
            assert_eq!(state.action_buttons(), vec![ActionButton::Next]);
            assert_eq!(state.selected_action(), Some(ActionButton::Next));
        }

        #[test]
        fn test_middle_step_offers_back_and_next() {
            let state = AppState::new(Wizard::new(true, 1));
            assert_eq!(
                state.action_buttons(),
                vec![ActionButton::Back, ActionButton::Next]
            );
            assert_eq!(state.selected_action(), Some(ActionButton::Next));
        }

        #[test]
        fn test_last_step_offers_submit() {
            let state = AppState::new(Wizard::new(true, 2));
            assert_eq!(
                state.action_buttons(),
                vec![ActionButton::Back, ActionButton::Submit]
            );
        }

        #[test]
        fn test_button_selection_wraps() {
            let mut state = AppState::new(Wizard::new(true, 1));
            state.next_button();
            assert_eq!(state.selected_action(), Some(ActionButton::Back));
            state.prev_button();
            assert_eq!(state.selected_action(), Some(ActionButton::Next));
        }

        #[test]
        fn test_labels() {
            assert_eq!(ActionButton::Back.label(), "Back");
            assert_eq!(ActionButton::Submit.label(), "Submit");
        }
    }

    mod error_queue {
        use super::*;

        #[test]
        fn test_errors_are_shown_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(state.current_error().is_none());
        }
    }

    #[test]
    fn test_pending_confirm_defaults_to_cancel() {
        let pending = PendingConfirm::new(ConfirmKind::Quit, "Quit?");
        assert!(!pending.selected_option);
        assert_eq!(pending.kind.confirm_label(), "Quit");
    }
}
