//! Form domain layer
//!
//! Typed field values, the per-step records, and the `Form` trait the app
//! drives key input through.

mod field;
mod form_state;
mod ids;
mod records;
mod validation;

pub use field::{
    Choice, DeliveryMode, FieldKind, FieldSpec, FieldValue, IntegerInput, ListField,
    ListFieldEntry, PasswordExpiration, Plan, UserType, YesNo, PASSWORD_EXPIRATION_MAX,
    PASSWORD_EXPIRATION_MIN,
};
pub use form_state::{
    BasicInformationForm, BasicSettingsForm, EmailSettingsForm, Form, StepForm,
};
#[cfg(test)]
pub use ids::MockEntryIdGenerator;
pub use ids::{EntryIdGenerator, UuidIds};
pub use records::{
    BasicInformation, BasicInformationField, BasicSettings, BasicSettingsField, EmailSettings,
    EmailSettingsField, Record, ADMIN_NAMES_MAX, CC_ADDRESSES_MAX, NOTIFICATION_EMAILS_MAX,
};
pub use validation::ValidationError;
