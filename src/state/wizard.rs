//! Wizard controller: step table, current step and the lifted step records

use super::forms::{
    BasicInformation, BasicInformationForm, BasicSettings, BasicSettingsForm, EmailSettings,
    EmailSettingsForm, Form, ValidationError,
};
use serde::Serialize;
use thiserror::Error;

/// Identifies one step of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    BasicInformation,
    BasicSettings,
    EmailSettings,
}

/// One entry of the ordered step table
#[derive(Debug, Clone, Copy)]
pub struct StepDescriptor {
    pub kind: StepKind,
    pub title: &'static str,
}

pub const STEPS: [StepDescriptor; 3] = [
    StepDescriptor {
        kind: StepKind::BasicInformation,
        title: "Basic Information",
    },
    StepDescriptor {
        kind: StepKind::BasicSettings,
        title: "Basic Settings",
    },
    StepDescriptor {
        kind: StepKind::EmailSettings,
        title: "Email Settings",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Submit is only available on the last step (currently on step {})", .current + 1)]
    NotOnLastStep { current: usize },

    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// Current step index, always within `0..STEPS.len()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardState {
    current: usize,
}

impl WizardState {
    pub fn at(index: usize) -> Self {
        Self {
            current: index.min(STEPS.len() - 1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> StepDescriptor {
        STEPS[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == STEPS.len() - 1
    }

    /// Advance one step, saturating at the last; returns whether it moved
    pub fn next(&mut self) -> bool {
        let next = (self.current + 1).min(STEPS.len() - 1);
        let moved = next != self.current;
        self.current = next;
        moved
    }

    /// Go back one step, saturating at the first; returns whether it moved
    pub fn prev(&mut self) -> bool {
        let prev = self.current.saturating_sub(1);
        let moved = prev != self.current;
        self.current = prev;
        moved
    }

    /// Submit is only reachable from the last step
    pub fn submit(&self) -> Result<(), WizardError> {
        if self.is_last() {
            Ok(())
        } else {
            Err(WizardError::NotOnLastStep {
                current: self.current,
            })
        }
    }
}

/// All step records, owned above the individual steps
#[derive(Debug, Clone, Default)]
pub struct StepForms {
    pub basic_information: BasicInformationForm,
    pub basic_settings: BasicSettingsForm,
    pub email_settings: EmailSettingsForm,
}

impl StepForms {
    pub fn get(&self, step: StepKind) -> &dyn Form {
        match step {
            StepKind::BasicInformation => &self.basic_information,
            StepKind::BasicSettings => &self.basic_settings,
            StepKind::EmailSettings => &self.email_settings,
        }
    }

    pub fn get_mut(&mut self, step: StepKind) -> &mut dyn Form {
        match step {
            StepKind::BasicInformation => &mut self.basic_information,
            StepKind::BasicSettings => &mut self.basic_settings,
            StepKind::EmailSettings => &mut self.email_settings,
        }
    }

    /// Validation errors across every step, in step order
    pub fn validate(&self) -> Vec<ValidationError> {
        STEPS
            .iter()
            .flat_map(|step| self.get(step.kind).validate())
            .collect()
    }

    pub fn submission(&self) -> OnboardingSubmission {
        OnboardingSubmission {
            basic_information: self.basic_information.record().clone(),
            basic_settings: self.basic_settings.record().clone(),
            email_settings: self.email_settings.record().clone(),
        }
    }
}

/// The collected records handed out on submit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSubmission {
    pub basic_information: BasicInformation,
    pub basic_settings: BasicSettings,
    pub email_settings: EmailSettings,
}

/// Step navigation over the lifted records
#[derive(Debug, Clone)]
pub struct Wizard {
    state: WizardState,
    forms: StepForms,
    /// When false, leaving a step discards what was entered on it
    keep_step_data: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(true, 0)
    }
}

impl Wizard {
    pub fn new(keep_step_data: bool, start_step: usize) -> Self {
        Self {
            state: WizardState::at(start_step),
            forms: StepForms::default(),
            keep_step_data,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn step(&self) -> StepDescriptor {
        self.state.step()
    }

    #[cfg(test)]
    pub fn forms(&self) -> &StepForms {
        &self.forms
    }

    #[cfg(test)]
    pub fn forms_mut(&mut self) -> &mut StepForms {
        &mut self.forms
    }

    /// The single step form currently shown
    pub fn active_form(&self) -> &dyn Form {
        self.forms.get(self.state.step().kind)
    }

    pub fn active_form_mut(&mut self) -> &mut dyn Form {
        let kind = self.state.step().kind;
        self.forms.get_mut(kind)
    }

    pub fn next(&mut self) -> bool {
        let leaving = self.state.step().kind;
        let moved = self.state.next();
        if moved {
            self.left_step(leaving);
        }
        moved
    }

    pub fn prev(&mut self) -> bool {
        let leaving = self.state.step().kind;
        let moved = self.state.prev();
        if moved {
            self.left_step(leaving);
        }
        moved
    }

    /// Check the wizard can be submitted and collect the records
    pub fn submit(&self) -> Result<OnboardingSubmission, WizardError> {
        self.state.submit()?;
        let errors = self.forms.validate();
        if !errors.is_empty() {
            return Err(WizardError::Invalid(errors));
        }
        tracing::debug!("Submission validated");
        Ok(self.forms.submission())
    }

    fn left_step(&mut self, step: StepKind) {
        tracing::debug!(?step, current = self.state.current(), "Changed step");
        if !self.keep_step_data {
            self.forms.get_mut(step).reset();
        } else {
            // Come back to the top of the step
            self.forms.get_mut(step).set_active_field(0);
        }
    }
}
