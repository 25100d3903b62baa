//! Per-step form records
//!
//! Each record is replaced wholesale on every edit: `with_value` returns a new
//! record equal to the old one except for the changed field.

use super::field::{
    DeliveryMode, FieldKind, FieldSpec, FieldValue, IntegerInput, ListField,
    PasswordExpiration, Plan, UserType, YesNo, PASSWORD_EXPIRATION_MAX, PASSWORD_EXPIRATION_MIN,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt::Debug;

pub const ADMIN_NAMES_MAX: usize = 20;
pub const NOTIFICATION_EMAILS_MAX: usize = 10;
pub const CC_ADDRESSES_MAX: usize = 5;

/// A step's data record, addressable field by field
pub trait Record: Clone + Default + Debug + PartialEq {
    type Field: Copy + Eq + Debug + 'static;

    /// Fields in display order
    const FIELDS: &'static [Self::Field];

    fn spec(field: Self::Field) -> FieldSpec;

    fn value(&self, field: Self::Field) -> FieldValue;

    /// New record with `field` replaced; a value of the wrong type leaves it unchanged
    fn with_value(&self, field: Self::Field, value: FieldValue) -> Self;
}

fn ignore_mismatch(field: impl Debug, value: &FieldValue) {
    tracing::debug!(?field, ?value, "Ignoring update with mismatched value type");
}

// Basic Information

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicInformationField {
    CompanyName,
    ContactPerson,
    Email,
    Plan,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInformation {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub plan: Plan,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Record for BasicInformation {
    type Field = BasicInformationField;

    const FIELDS: &'static [BasicInformationField] = &[
        BasicInformationField::CompanyName,
        BasicInformationField::ContactPerson,
        BasicInformationField::Email,
        BasicInformationField::Plan,
        BasicInformationField::StartDate,
        BasicInformationField::EndDate,
    ];

    fn spec(field: BasicInformationField) -> FieldSpec {
        const SECTION: &str = "Customer information";
        match field {
            BasicInformationField::CompanyName => {
                FieldSpec::new("companyName", "Company name", SECTION, FieldKind::Text)
                    .placeholder("Enter the company name")
            }
            BasicInformationField::ContactPerson => {
                FieldSpec::new("contactPerson", "Contact person", SECTION, FieldKind::Text)
                    .placeholder("Enter the contact person's name")
            }
            BasicInformationField::Email => {
                FieldSpec::new("email", "Email address", SECTION, FieldKind::Email)
                    .placeholder("Enter an email address")
            }
            BasicInformationField::Plan => {
                FieldSpec::new("plan", "Plan", SECTION, FieldKind::Select)
            }
            BasicInformationField::StartDate => {
                FieldSpec::new("startDate", "Usage start date", SECTION, FieldKind::Date)
                    .placeholder("Select a start date")
            }
            BasicInformationField::EndDate => {
                FieldSpec::new("endDate", "Usage end date", SECTION, FieldKind::Date)
                    .placeholder("Select an end date")
            }
        }
    }

    fn value(&self, field: BasicInformationField) -> FieldValue {
        match field {
            BasicInformationField::CompanyName => FieldValue::Text(self.company_name.clone()),
            BasicInformationField::ContactPerson => FieldValue::Text(self.contact_person.clone()),
            BasicInformationField::Email => FieldValue::Text(self.email.clone()),
            BasicInformationField::Plan => FieldValue::Plan(self.plan),
            BasicInformationField::StartDate => FieldValue::Date(self.start_date),
            BasicInformationField::EndDate => FieldValue::Date(self.end_date),
        }
    }

    fn with_value(&self, field: BasicInformationField, value: FieldValue) -> Self {
        let mut next = self.clone();
        match (field, value) {
            (BasicInformationField::CompanyName, FieldValue::Text(v)) => next.company_name = v,
            (BasicInformationField::ContactPerson, FieldValue::Text(v)) => {
                next.contact_person = v
            }
            (BasicInformationField::Email, FieldValue::Text(v)) => next.email = v,
            (BasicInformationField::Plan, FieldValue::Plan(v)) => next.plan = v,
            (BasicInformationField::StartDate, FieldValue::Date(v)) => next.start_date = v,
            (BasicInformationField::EndDate, FieldValue::Date(v)) => next.end_date = v,
            (field, value) => ignore_mismatch(field, &value),
        }
        next
    }
}

// Basic Settings

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicSettingsField {
    AdminNames,
    UserType,
    NotificationEmails,
    DayChangeTime,
    PasswordExpiration,
    AlertThreshold,
    UseCsvDownload,
    UseMasterUploadApi,
    UseAzureAdSso,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicSettings {
    pub admin_names: ListField,
    pub user_type: UserType,
    pub notification_emails: ListField,
    pub day_change_time: NaiveTime,
    pub password_expiration: PasswordExpiration,
    pub alert_threshold: IntegerInput,
    pub use_csv_download: YesNo,
    pub use_master_upload_api: YesNo,
    pub use_azure_ad_sso: YesNo,
}

impl Default for BasicSettings {
    fn default() -> Self {
        Self {
            admin_names: ListField::seeded(ADMIN_NAMES_MAX),
            user_type: UserType::default(),
            notification_emails: ListField::seeded(NOTIFICATION_EMAILS_MAX),
            day_change_time: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default(),
            password_expiration: PasswordExpiration::Unlimited,
            alert_threshold: IntegerInput::Value(30),
            use_csv_download: YesNo::Yes,
            use_master_upload_api: YesNo::No,
            use_azure_ad_sso: YesNo::No,
        }
    }
}

impl BasicSettings {
    /// Apply a password expiration range position (91 means unlimited)
    pub fn with_password_expiration_position(&self, position: i64) -> Self {
        Self {
            password_expiration: PasswordExpiration::from_position(position),
            ..self.clone()
        }
    }

    /// Apply raw alert threshold text, parsed as a base-10 integer
    pub fn with_alert_threshold_text(&self, raw: &str) -> Self {
        Self {
            alert_threshold: IntegerInput::parse(raw),
            ..self.clone()
        }
    }
}

impl Record for BasicSettings {
    type Field = BasicSettingsField;

    const FIELDS: &'static [BasicSettingsField] = &[
        BasicSettingsField::AdminNames,
        BasicSettingsField::UserType,
        BasicSettingsField::NotificationEmails,
        BasicSettingsField::DayChangeTime,
        BasicSettingsField::PasswordExpiration,
        BasicSettingsField::AlertThreshold,
        BasicSettingsField::UseCsvDownload,
        BasicSettingsField::UseMasterUploadApi,
        BasicSettingsField::UseAzureAdSso,
    ];

    fn spec(field: BasicSettingsField) -> FieldSpec {
        const COMMON: &str = "Common settings";
        match field {
            BasicSettingsField::AdminNames => {
                FieldSpec::new("adminNames", "HR admin names", COMMON, FieldKind::MultiInput)
                    .placeholder("Enter a full name")
                    .tooltip("Up to 20 people can be registered")
            }
            BasicSettingsField::UserType => {
                FieldSpec::new("userType", "Login user type", COMMON, FieldKind::Select)
            }
            BasicSettingsField::NotificationEmails => FieldSpec::new(
                "notificationEmails",
                "Notification email addresses",
                COMMON,
                FieldKind::MultiInput,
            )
            .placeholder("Enter an email address")
            .tooltip("Up to 10 addresses can be registered"),
            BasicSettingsField::DayChangeTime => FieldSpec::new(
                "dayChangeTime",
                "Working-day change time",
                COMMON,
                FieldKind::Time,
            )
            .placeholder("Select a time")
            .tooltip("Set in whole hours (5:30 and similar cannot be chosen)"),
            BasicSettingsField::PasswordExpiration => FieldSpec::new(
                "passwordExpiration",
                "Login password expiration",
                COMMON,
                FieldKind::Range {
                    min: PASSWORD_EXPIRATION_MIN,
                    max: PASSWORD_EXPIRATION_MAX,
                },
            ),
            BasicSettingsField::AlertThreshold => FieldSpec::new(
                "alertThreshold",
                "Alert threshold for time discrepancy (minutes)",
                "T plan settings",
                FieldKind::Number { min: 0 },
            )
            .tooltip("Enter an integer of 0 or more")
            .help_text("e.g. entering \"5\" treats a 5 minute discrepancy as an alert"),
            BasicSettingsField::UseCsvDownload => FieldSpec::new(
                "useCsvDownload",
                "Use the CSV file download feature?",
                "J plan settings",
                FieldKind::Select,
            ),
            BasicSettingsField::UseMasterUploadApi => FieldSpec::new(
                "useMasterUploadApi",
                "Use the master upload / import API?",
                "Master upload / import API settings",
                FieldKind::Select,
            ),
            BasicSettingsField::UseAzureAdSso => FieldSpec::new(
                "useAzureAdSso",
                "Use Azure AD single sign-on?",
                "Single sign-on settings",
                FieldKind::Select,
            ),
        }
    }

    fn value(&self, field: BasicSettingsField) -> FieldValue {
        match field {
            BasicSettingsField::AdminNames => FieldValue::List(self.admin_names.clone()),
            BasicSettingsField::UserType => FieldValue::UserType(self.user_type),
            BasicSettingsField::NotificationEmails => {
                FieldValue::List(self.notification_emails.clone())
            }
            BasicSettingsField::DayChangeTime => FieldValue::Time(self.day_change_time),
            BasicSettingsField::PasswordExpiration => {
                FieldValue::Expiration(self.password_expiration)
            }
            BasicSettingsField::AlertThreshold => FieldValue::Integer(self.alert_threshold.clone()),
            BasicSettingsField::UseCsvDownload => FieldValue::Toggle(self.use_csv_download),
            BasicSettingsField::UseMasterUploadApi => FieldValue::Toggle(self.use_master_upload_api),
            BasicSettingsField::UseAzureAdSso => FieldValue::Toggle(self.use_azure_ad_sso),
        }
    }

    fn with_value(&self, field: BasicSettingsField, value: FieldValue) -> Self {
        let mut next = self.clone();
        match (field, value) {
            (BasicSettingsField::AdminNames, FieldValue::List(v)) => next.admin_names = v,
            (BasicSettingsField::UserType, FieldValue::UserType(v)) => next.user_type = v,
            (BasicSettingsField::NotificationEmails, FieldValue::List(v)) => {
                next.notification_emails = v
            }
            (BasicSettingsField::DayChangeTime, FieldValue::Time(v)) => next.day_change_time = v,
            // Range and number edits go through their parsing rules
            (BasicSettingsField::PasswordExpiration, FieldValue::Expiration(v)) => {
                return self.with_password_expiration_position(i64::from(v.position()));
            }
            (BasicSettingsField::AlertThreshold, FieldValue::Integer(v)) => {
                return self.with_alert_threshold_text(&v.display_value());
            }
            (BasicSettingsField::UseCsvDownload, FieldValue::Toggle(v)) => {
                next.use_csv_download = v
            }
            (BasicSettingsField::UseMasterUploadApi, FieldValue::Toggle(v)) => {
                next.use_master_upload_api = v
            }
            (BasicSettingsField::UseAzureAdSso, FieldValue::Toggle(v)) => {
                next.use_azure_ad_sso = v
            }
            (field, value) => ignore_mismatch(field, &value),
        }
        next
    }
}

// Email Settings

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailSettingsField {
    SenderName,
    SenderAddress,
    SubjectPrefix,
    DeliveryMode,
    DigestTime,
    CcAddresses,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    pub sender_name: String,
    pub sender_address: String,
    pub subject_prefix: String,
    pub delivery_mode: DeliveryMode,
    pub digest_time: NaiveTime,
    pub cc_addresses: ListField,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            sender_name: String::new(),
            sender_address: String::new(),
            subject_prefix: String::new(),
            delivery_mode: DeliveryMode::default(),
            digest_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            cc_addresses: ListField::new(CC_ADDRESSES_MAX),
        }
    }
}

impl Record for EmailSettings {
    type Field = EmailSettingsField;

    const FIELDS: &'static [EmailSettingsField] = &[
        EmailSettingsField::SenderName,
        EmailSettingsField::SenderAddress,
        EmailSettingsField::SubjectPrefix,
        EmailSettingsField::DeliveryMode,
        EmailSettingsField::DigestTime,
        EmailSettingsField::CcAddresses,
    ];

    fn spec(field: EmailSettingsField) -> FieldSpec {
        const SENDER: &str = "Alert email sender";
        const DELIVERY: &str = "Alert email delivery";
        match field {
            EmailSettingsField::SenderName => {
                FieldSpec::new("senderName", "Sender name", SENDER, FieldKind::Text)
                    .placeholder("Enter the name shown as the sender")
            }
            EmailSettingsField::SenderAddress => {
                FieldSpec::new("senderAddress", "Sender address", SENDER, FieldKind::Email)
                    .placeholder("Enter an email address")
            }
            EmailSettingsField::SubjectPrefix => {
                FieldSpec::new("subjectPrefix", "Subject prefix", SENDER, FieldKind::Text)
                    .placeholder("[Alert]")
                    .help_text("Prepended to the subject of every alert email")
            }
            EmailSettingsField::DeliveryMode => {
                FieldSpec::new("deliveryMode", "Delivery", DELIVERY, FieldKind::Select)
            }
            EmailSettingsField::DigestTime => {
                FieldSpec::new("digestTime", "Digest send time", DELIVERY, FieldKind::Time)
                    .placeholder("Select a time")
                    .help_text("Used when delivery is set to daily digest")
            }
            EmailSettingsField::CcAddresses => {
                FieldSpec::new("ccAddresses", "CC addresses", DELIVERY, FieldKind::MultiInput)
                    .placeholder("Enter an email address")
                    .tooltip("Up to 5 addresses can be registered")
            }
        }
    }

    fn value(&self, field: EmailSettingsField) -> FieldValue {
        match field {
            EmailSettingsField::SenderName => FieldValue::Text(self.sender_name.clone()),
            EmailSettingsField::SenderAddress => FieldValue::Text(self.sender_address.clone()),
            EmailSettingsField::SubjectPrefix => FieldValue::Text(self.subject_prefix.clone()),
            EmailSettingsField::DeliveryMode => FieldValue::Delivery(self.delivery_mode),
            EmailSettingsField::DigestTime => FieldValue::Time(self.digest_time),
            EmailSettingsField::CcAddresses => FieldValue::List(self.cc_addresses.clone()),
        }
    }

    fn with_value(&self, field: EmailSettingsField, value: FieldValue) -> Self {
        let mut next = self.clone();
        match (field, value) {
            (EmailSettingsField::SenderName, FieldValue::Text(v)) => next.sender_name = v,
            (EmailSettingsField::SenderAddress, FieldValue::Text(v)) => next.sender_address = v,
            (EmailSettingsField::SubjectPrefix, FieldValue::Text(v)) => next.subject_prefix = v,
            (EmailSettingsField::DeliveryMode, FieldValue::Delivery(v)) => next.delivery_mode = v,
            (EmailSettingsField::DigestTime, FieldValue::Time(v)) => next.digest_time = v,
            (EmailSettingsField::CcAddresses, FieldValue::List(v)) => next.cc_addresses = v,
            (field, value) => ignore_mismatch(field, &value),
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::ListFieldEntry;

    mod basic_information {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults() {
            let record = BasicInformation::default();
            assert_eq!(record.company_name, "");
            assert_eq!(record.plan, Plan::S);
            assert!(record.start_date.is_none());
            assert!(record.end_date.is_none());
        }

        #[test]
        fn test_with_value_replaces_only_that_field() {
            let record = BasicInformation {
                contact_person: "Hanako".to_string(),
                ..Default::default()
            };
            let next = record.with_value(
                BasicInformationField::CompanyName,
                FieldValue::Text("Acme KK".to_string()),
            );
            assert_eq!(
                next,
                BasicInformation {
                    company_name: "Acme KK".to_string(),
                    contact_person: "Hanako".to_string(),
                    ..Default::default()
                }
            );
            // Previous record is untouched
            assert_eq!(record.company_name, "");
        }

        #[test]
        fn test_mismatched_value_is_ignored() {
            let record = BasicInformation::default();
            let next = record.with_value(BasicInformationField::Plan, FieldValue::Text("T".into()));
            assert_eq!(next, record);
        }

        #[test]
        fn test_value_round_trips_through_every_field() {
            let record = BasicInformation {
                company_name: "Acme".to_string(),
                plan: Plan::J,
                end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
                ..Default::default()
            };
            for &field in BasicInformation::FIELDS {
                assert_eq!(record.with_value(field, record.value(field)), record);
            }
        }

        #[test]
        fn test_serializes_camel_case() {
            let record = BasicInformation {
                start_date: NaiveDate::from_ymd_opt(2024, 4, 1),
                ..Default::default()
            };
            let json = serde_json::to_value(&record).unwrap();
            assert_eq!(json["companyName"], "");
            assert_eq!(json["plan"], "S");
            assert_eq!(json["startDate"], "2024-04-01");
            assert!(json["endDate"].is_null());
        }
    }

    mod basic_settings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults() {
            let record = BasicSettings::default();
            assert_eq!(record.admin_names.entries(), &[ListFieldEntry::new("1", "")]);
            assert_eq!(record.admin_names.max(), 20);
            assert_eq!(record.notification_emails.max(), 10);
            assert_eq!(record.user_type, UserType::AdminOnly);
            assert_eq!(
                record.day_change_time,
                NaiveTime::from_hms_opt(5, 0, 0).unwrap()
            );
            assert_eq!(record.password_expiration, PasswordExpiration::Unlimited);
            assert_eq!(record.alert_threshold, IntegerInput::Value(30));
            assert_eq!(record.use_csv_download, YesNo::Yes);
            assert_eq!(record.use_master_upload_api, YesNo::No);
            assert_eq!(record.use_azure_ad_sso, YesNo::No);
        }

        #[test]
        fn test_password_expiration_scenario() {
            let record = BasicSettings::default();
            assert_eq!(record.password_expiration.label(), "Unlimited");

            let record = record.with_password_expiration_position(45);
            assert_eq!(record.password_expiration, PasswordExpiration::Days(45));
            assert_eq!(record.password_expiration.label(), "45 days");

            let record = record.with_password_expiration_position(91);
            assert_eq!(record.password_expiration, PasswordExpiration::Unlimited);
        }

        #[test]
        fn test_alert_threshold_text() {
            let record = BasicSettings::default().with_alert_threshold_text("15");
            assert_eq!(record.alert_threshold, IntegerInput::Value(15));

            let record = record.with_alert_threshold_text("fifteen");
            assert_eq!(
                record.alert_threshold,
                IntegerInput::Invalid("fifteen".to_string())
            );
        }

        #[test]
        fn test_field_updates_apply_range_and_number_rules() {
            let record = BasicSettings::default().with_value(
                BasicSettingsField::PasswordExpiration,
                FieldValue::Expiration(PasswordExpiration::Days(95)),
            );
            assert_eq!(record.password_expiration, PasswordExpiration::Unlimited);

            let record = record.with_value(
                BasicSettingsField::PasswordExpiration,
                FieldValue::Expiration(PasswordExpiration::Days(10)),
            );
            assert_eq!(record.password_expiration, PasswordExpiration::Days(30));

            let record = record.with_value(
                BasicSettingsField::AlertThreshold,
                FieldValue::Integer(IntegerInput::Invalid(" 42".to_string())),
            );
            assert_eq!(record.alert_threshold, IntegerInput::Value(42));
        }

        #[test]
        fn test_list_update_leaves_siblings() {
            let record = BasicSettings::default();
            let admins = record.admin_names.updated("1", "Taro Yamada");
            let next = record.with_value(BasicSettingsField::AdminNames, FieldValue::List(admins));
            assert_eq!(next.admin_names.entries()[0].value, "Taro Yamada");
            assert_eq!(next.notification_emails, record.notification_emails);
            assert_eq!(next.password_expiration, record.password_expiration);
        }

        #[test]
        fn test_serialization_shape() {
            let json = serde_json::to_value(BasicSettings::default()).unwrap();
            assert_eq!(json["userType"], "adminOnly");
            assert_eq!(json["passwordExpiration"], "unlimited");
            assert_eq!(json["alertThreshold"], 30);
            assert_eq!(json["useCsvDownload"], "yes");
            assert_eq!(json["dayChangeTime"], "05:00:00");
            assert_eq!(json["adminNames"][0]["id"], "1");
        }
    }

    mod email_settings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults() {
            let record = EmailSettings::default();
            assert_eq!(record.delivery_mode, DeliveryMode::Immediate);
            assert_eq!(record.digest_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
            assert!(record.cc_addresses.is_empty());
            assert_eq!(record.cc_addresses.max(), CC_ADDRESSES_MAX);
        }

        #[test]
        fn test_every_field_has_unique_name() {
            let mut names: Vec<&str> = EmailSettings::FIELDS
                .iter()
                .map(|f| EmailSettings::spec(*f).name)
                .collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), EmailSettings::FIELDS.len());
        }
    }
}
