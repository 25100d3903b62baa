//! Form state management: focus, list rows and key-level edits over a record

use super::field::{FieldSpec, FieldValue, ListField};
use super::ids::EntryIdGenerator;
use super::records::{BasicInformation, BasicSettings, EmailSettings, Record};
use super::validation::{validate_field, ValidationError};
use chrono::NaiveDate;

/// Trait for common form operations
pub trait Form {
    /// Number of focusable rows, including the trailing actions row
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn is_actions_row_active(&self) -> bool {
        self.active_field() + 1 == self.field_count()
    }
    fn get_field(&self, index: usize) -> Option<(FieldSpec, FieldValue)>;
    fn field_error(&self, index: usize) -> Option<ValidationError>;
    /// Focused row inside the active list field
    fn list_row(&self) -> usize;

    fn input_char(&mut self, c: char);
    fn backspace(&mut self);
    /// Left/Right: cycle options, move dates by day, times by hour, ranges by one
    fn step_value(&mut self, delta: i64, today: NaiveDate);
    fn step_months(&mut self, delta: i32, today: NaiveDate);
    fn jump_to_extreme(&mut self, to_max: bool);
    /// Delete: clear the value or remove the focused list entry
    fn clear_active(&mut self);
    /// Move up inside a list field; false when the focus should leave the field
    fn move_up(&mut self) -> bool;
    fn move_down(&mut self) -> bool;
    /// Enter: add an entry on a list's add row; false when nothing happened
    fn activate(&mut self, ids: &mut dyn EntryIdGenerator) -> bool;

    fn validate(&self) -> Vec<ValidationError>;
    fn reset(&mut self);
}

pub type BasicInformationForm = StepForm<BasicInformation>;
pub type BasicSettingsForm = StepForm<BasicSettings>;
pub type EmailSettingsForm = StepForm<EmailSettings>;

/// One wizard step: a record plus the focus state used to edit it
#[derive(Debug, Clone, Default)]
pub struct StepForm<R: Record> {
    record: R,
    active_field_index: usize,
    list_row: usize,
}

impl<R: Record> StepForm<R> {
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Field at the focused row, `None` on the actions row
    pub fn active(&self) -> Option<R::Field> {
        R::FIELDS.get(self.active_field_index).copied()
    }

    /// Replace a single field's value
    pub fn set_value(&mut self, field: R::Field, value: FieldValue) {
        self.update_record(|record| record.with_value(field, value));
    }

    /// Replace the record with one derived from the current record
    pub fn update_record(&mut self, update: impl FnOnce(&R) -> R) {
        self.record = update(&self.record);
    }

    /// Append an empty entry to a list field; no-op at its maximum
    pub fn add_entry(&mut self, field: R::Field, ids: &mut dyn EntryIdGenerator) {
        self.update_list(field, |list| list.added(ids));
    }

    /// Set the value of the entry with `id`; no-op if absent
    pub fn update_entry(&mut self, field: R::Field, id: &str, value: &str) {
        self.update_list(field, |list| list.updated(id, value));
    }

    /// Remove the entry with `id`; no-op if absent
    pub fn remove_entry(&mut self, field: R::Field, id: &str) {
        self.update_list(field, |list| list.removed(id));
    }

    fn update_list(&mut self, field: R::Field, update: impl FnOnce(&ListField) -> ListField) {
        let value = self.record.value(field);
        if let Some(list) = value.as_list() {
            let next = update(list);
            if next != *list {
                tracing::debug!(
                    field = R::spec(field).name,
                    before = list.len(),
                    after = next.len(),
                    "List field changed"
                );
                self.set_value(field, FieldValue::List(next));
            }
        }
    }

    fn active_value(&self) -> Option<(R::Field, FieldValue)> {
        self.active().map(|f| (f, self.record.value(f)))
    }

    fn active_list(&self) -> Option<(R::Field, ListField)> {
        match self.active_value()? {
            (field, FieldValue::List(list)) => Some((field, list)),
            _ => None,
        }
    }

    /// Apply `edit` to the active field's value, when it yields one
    fn edit_active(&mut self, edit: impl FnOnce(&FieldValue) -> Option<FieldValue>) {
        if let Some((field, value)) = self.active_value() {
            if let Some(next) = edit(&value) {
                self.set_value(field, next);
            }
        }
    }

    /// Apply `edit` to the focused list entry's text
    fn edit_list_entry(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some((field, list)) = self.active_list() {
            if let Some(entry) = list.entries().get(self.list_row) {
                let mut value = entry.value.clone();
                edit(&mut value);
                self.update_entry(field, &entry.id, &value);
            }
        }
    }

    fn list_row_count(list: &ListField) -> usize {
        list.len() + usize::from(list.can_add())
    }
}

impl<R: Record> Form for StepForm<R> {
    fn field_count(&self) -> usize {
        R::FIELDS.len() + 1 // fields + actions row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(R::FIELDS.len());
        self.list_row = 0;
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let index = if self.active_field_index == 0 {
            count - 1
        } else {
            self.active_field_index - 1
        };
        self.set_active_field(index);
        // Entering a list from below lands on its last row
        if let Some((_, list)) = self.active_list() {
            self.list_row = Self::list_row_count(&list).saturating_sub(1);
        }
    }
    fn get_field(&self, index: usize) -> Option<(FieldSpec, FieldValue)> {
        R::FIELDS
            .get(index)
            .map(|f| (R::spec(*f), self.record.value(*f)))
    }
    fn field_error(&self, index: usize) -> Option<ValidationError> {
        let (spec, value) = self.get_field(index)?;
        validate_field(&spec, &value)
    }
    fn list_row(&self) -> usize {
        self.list_row
    }

    fn input_char(&mut self, c: char) {
        if self.active_list().is_some() {
            self.edit_list_entry(|value| value.push(c));
        } else {
            self.edit_active(|value| value.push_char(c));
        }
    }

    fn backspace(&mut self) {
        if self.active_list().is_some() {
            self.edit_list_entry(|value| {
                value.pop();
            });
        } else {
            self.edit_active(FieldValue::pop_char);
        }
    }

    fn step_value(&mut self, delta: i64, today: NaiveDate) {
        self.edit_active(|value| value.stepped(delta, today));
    }

    fn step_months(&mut self, delta: i32, today: NaiveDate) {
        self.edit_active(|value| value.stepped_months(delta, today));
    }

    fn jump_to_extreme(&mut self, to_max: bool) {
        self.edit_active(|value| value.extreme(to_max));
    }

    fn clear_active(&mut self) {
        if let Some((field, list)) = self.active_list() {
            if let Some(entry) = list.entries().get(self.list_row) {
                self.remove_entry(field, &entry.id);
                if let Some((_, list)) = self.active_list() {
                    self.list_row = self
                        .list_row
                        .min(Self::list_row_count(&list).saturating_sub(1));
                }
            }
        } else {
            self.edit_active(FieldValue::cleared);
        }
    }

    fn move_up(&mut self) -> bool {
        if self.active_list().is_some() && self.list_row > 0 {
            self.list_row -= 1;
            return true;
        }
        false
    }

    fn move_down(&mut self) -> bool {
        if let Some((_, list)) = self.active_list() {
            if self.list_row + 1 < Self::list_row_count(&list) {
                self.list_row += 1;
                return true;
            }
        }
        false
    }

    fn activate(&mut self, ids: &mut dyn EntryIdGenerator) -> bool {
        let Some((field, list)) = self.active_list() else {
            return false;
        };
        if self.list_row == list.len() && list.can_add() {
            self.add_entry(field, ids);
            // Focus the new entry
            self.list_row = list.len();
            return true;
        }
        self.move_down()
    }

    fn validate(&self) -> Vec<ValidationError> {
        R::FIELDS
            .iter()
            .filter_map(|f| validate_field(&R::spec(*f), &self.record.value(*f)))
            .collect()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
