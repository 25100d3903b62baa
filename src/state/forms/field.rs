//! Form field value objects

use super::ids::EntryIdGenerator;
use chrono::{Months, NaiveDate, NaiveTime, TimeDelta};
use serde::{Serialize, Serializer};

/// Lowest position of the password expiration range control
pub const PASSWORD_EXPIRATION_MIN: u16 = 30;
/// Highest position of the range control, reserved for "unlimited"
pub const PASSWORD_EXPIRATION_MAX: u16 = 91;

/// How a field is rendered and which input constraints apply to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number { min: i64 },
    Select,
    Date,
    Time,
    Range { min: u16, max: u16 },
    MultiInput,
}

/// Static description of a single form field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Stable field name, matches the serialized key
    pub name: &'static str,
    pub label: &'static str,
    /// Section heading the field is grouped under
    pub section: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub tooltip: Option<&'static str>,
    pub help_text: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        section: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            label,
            section,
            kind,
            placeholder: None,
            tooltip: None,
            help_text: None,
        }
    }

    pub const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    pub const fn tooltip(mut self, text: &'static str) -> Self {
        self.tooltip = Some(text);
        self
    }

    pub const fn help_text(mut self, text: &'static str) -> Self {
        self.help_text = Some(text);
        self
    }
}

/// Enumerated select options
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    fn cycled(&self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let index = self.index();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ALL[next]
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Plan {
    #[default]
    S,
    T,
    J,
}

impl Choice for Plan {
    const ALL: &'static [Self] = &[Plan::S, Plan::T, Plan::J];

    fn label(&self) -> &'static str {
        match self {
            Plan::S => "S",
            Plan::T => "T",
            Plan::J => "J",
        }
    }
}

/// Who can log in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    #[default]
    AdminOnly,
    AdminAndOrgManager,
}

impl Choice for UserType {
    const ALL: &'static [Self] = &[UserType::AdminOnly, UserType::AdminAndOrgManager];

    fn label(&self) -> &'static str {
        match self {
            UserType::AdminOnly => "HR admins only",
            UserType::AdminAndOrgManager => "HR admins + organization managers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl Choice for YesNo {
    const ALL: &'static [Self] = &[YesNo::Yes, YesNo::No];

    fn label(&self) -> &'static str {
        match self {
            YesNo::Yes => "Use",
            YesNo::No => "Don't use",
        }
    }
}

/// When alert emails go out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryMode {
    #[default]
    Immediate,
    DailyDigest,
}

impl Choice for DeliveryMode {
    const ALL: &'static [Self] = &[DeliveryMode::Immediate, DeliveryMode::DailyDigest];

    fn label(&self) -> &'static str {
        match self {
            DeliveryMode::Immediate => "Send immediately",
            DeliveryMode::DailyDigest => "Daily digest",
        }
    }
}

/// Login password lifetime, position 91 on the range control means unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordExpiration {
    #[default]
    Unlimited,
    Days(u16),
}

impl PasswordExpiration {
    /// Map a range control position, clamped to 30..=91
    pub fn from_position(position: i64) -> Self {
        let position = position.clamp(
            i64::from(PASSWORD_EXPIRATION_MIN),
            i64::from(PASSWORD_EXPIRATION_MAX),
        ) as u16;
        if position == PASSWORD_EXPIRATION_MAX {
            PasswordExpiration::Unlimited
        } else {
            PasswordExpiration::Days(position)
        }
    }

    /// Position of this value on the range control
    pub fn position(&self) -> u16 {
        match self {
            PasswordExpiration::Unlimited => PASSWORD_EXPIRATION_MAX,
            PasswordExpiration::Days(days) => *days,
        }
    }

    pub fn label(&self) -> String {
        match self {
            PasswordExpiration::Unlimited => "Unlimited".to_string(),
            PasswordExpiration::Days(days) => format!("{days} days"),
        }
    }
}

impl Serialize for PasswordExpiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PasswordExpiration::Unlimited => serializer.serialize_str("unlimited"),
            PasswordExpiration::Days(days) => serializer.serialize_u16(*days),
        }
    }
}

/// Integer typed as free text; unparseable input is kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerInput {
    Value(i64),
    Invalid(String),
}

impl IntegerInput {
    /// Base-10 parse of the trimmed text
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(value) => IntegerInput::Value(value),
            Err(_) => IntegerInput::Invalid(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            IntegerInput::Value(value) => Some(*value),
            IntegerInput::Invalid(_) => None,
        }
    }

    pub fn display_value(&self) -> String {
        match self {
            IntegerInput::Value(value) => value.to_string(),
            IntegerInput::Invalid(raw) => raw.clone(),
        }
    }
}

impl Serialize for IntegerInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IntegerInput::Value(value) => serializer.serialize_i64(*value),
            IntegerInput::Invalid(_) => serializer.serialize_none(),
        }
    }
}

/// One editable row of a multi-value field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFieldEntry {
    pub id: String,
    pub value: String,
}

impl ListFieldEntry {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Ordered, bounded list of entries addressed by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListField {
    entries: Vec<ListFieldEntry>,
    max: usize,
}

impl ListField {
    pub fn new(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max,
        }
    }

    /// A list holding one empty entry with id "1"
    pub fn seeded(max: usize) -> Self {
        Self {
            entries: vec![ListFieldEntry::new("1", "")],
            max,
        }
    }

    #[cfg(test)]
    pub fn with_entries(max: usize, mut entries: Vec<ListFieldEntry>) -> Self {
        entries.truncate(max);
        Self { entries, max }
    }

    pub fn entries(&self) -> &[ListFieldEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Pairs with len() for clippy::len_without_is_empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Whether the "add" action is offered
    pub fn can_add(&self) -> bool {
        self.entries.len() < self.max
    }

    pub fn get(&self, id: &str) -> Option<&ListFieldEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append an empty entry with a fresh id; no-op at the maximum
    pub fn added(&self, ids: &mut dyn EntryIdGenerator) -> Self {
        if !self.can_add() {
            return self.clone();
        }
        let id = self.unique_id(ids.next_id());
        let mut entries = self.entries.clone();
        entries.push(ListFieldEntry::new(id, ""));
        Self {
            entries,
            max: self.max,
        }
    }

    /// Replace the value of the entry with `id`; no-op if absent
    pub fn updated(&self, id: &str, value: &str) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| {
                if e.id == id {
                    ListFieldEntry::new(e.id.clone(), value)
                } else {
                    e.clone()
                }
            })
            .collect();
        Self {
            entries,
            max: self.max,
        }
    }

    /// Drop the entry with `id`; no-op if absent
    pub fn removed(&self, id: &str) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        Self {
            entries,
            max: self.max,
        }
    }

    /// Non-blank entry values in display order
    pub fn filled_values(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|e| e.value.trim())
            .filter(|v| !v.is_empty())
    }

    fn unique_id(&self, candidate: String) -> String {
        if self.get(&candidate).is_none() {
            return candidate;
        }
        (2..)
            .map(|n| format!("{candidate}-{n}"))
            .find(|id| self.get(id).is_none())
            .unwrap_or(candidate)
    }
}

impl Serialize for ListField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Plan(Plan),
    UserType(UserType),
    Toggle(YesNo),
    Delivery(DeliveryMode),
    Date(Option<NaiveDate>),
    Time(NaiveTime),
    Expiration(PasswordExpiration),
    Integer(IntegerInput),
    List(ListField),
}

impl FieldValue {
    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Plan(p) => p.label().to_string(),
            FieldValue::UserType(u) => u.label().to_string(),
            FieldValue::Toggle(t) => t.label().to_string(),
            FieldValue::Delivery(d) => d.label().to_string(),
            FieldValue::Date(Some(d)) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Date(None) => String::new(),
            FieldValue::Time(t) => t.format("%H:%M").to_string(),
            FieldValue::Expiration(e) => e.label(),
            FieldValue::Integer(i) => i.display_value(),
            FieldValue::List(list) => list.filled_values().collect::<Vec<_>>().join(", "),
        }
    }

    /// Option labels and the selected index, for select fields
    pub fn options(&self) -> Option<(Vec<&'static str>, usize)> {
        match self {
            FieldValue::Plan(p) => Some((Plan::labels(), p.index())),
            FieldValue::UserType(u) => Some((UserType::labels(), u.index())),
            FieldValue::Toggle(t) => Some((YesNo::labels(), t.index())),
            FieldValue::Delivery(d) => Some((DeliveryMode::labels(), d.index())),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListField> {
        match self {
            FieldValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Append a typed character to text-like values
    pub fn push_char(&self, c: char) -> Option<Self> {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.push(c);
                Some(FieldValue::Text(s))
            }
            FieldValue::Integer(i) => {
                let mut raw = i.display_value();
                raw.push(c);
                Some(FieldValue::Integer(IntegerInput::parse(&raw)))
            }
            _ => None,
        }
    }

    /// Remove the last character of text-like values
    pub fn pop_char(&self) -> Option<Self> {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.pop();
                Some(FieldValue::Text(s))
            }
            FieldValue::Integer(i) => {
                let mut raw = i.display_value();
                raw.pop();
                Some(FieldValue::Integer(IntegerInput::parse(&raw)))
            }
            _ => None,
        }
    }

    /// Move by `delta` units: options cycle, dates by day, times by hour, ranges by one
    pub fn stepped(&self, delta: i64, today: NaiveDate) -> Option<Self> {
        let forward = delta >= 0;
        match self {
            FieldValue::Plan(p) => Some(FieldValue::Plan(p.cycled(forward))),
            FieldValue::UserType(u) => Some(FieldValue::UserType(u.cycled(forward))),
            FieldValue::Toggle(t) => Some(FieldValue::Toggle(t.cycled(forward))),
            FieldValue::Delivery(d) => Some(FieldValue::Delivery(d.cycled(forward))),
            FieldValue::Date(None) => Some(FieldValue::Date(Some(today))),
            FieldValue::Date(Some(d)) => {
                let moved = TimeDelta::try_days(delta).and_then(|days| d.checked_add_signed(days));
                Some(FieldValue::Date(Some(moved.unwrap_or(*d))))
            }
            FieldValue::Time(t) => {
                let hours = TimeDelta::try_hours(delta % 24)?;
                Some(FieldValue::Time(t.overflowing_add_signed(hours).0))
            }
            FieldValue::Expiration(e) => Some(FieldValue::Expiration(
                PasswordExpiration::from_position(i64::from(e.position()) + delta),
            )),
            _ => None,
        }
    }

    /// Move a date by whole months
    pub fn stepped_months(&self, delta: i32, today: NaiveDate) -> Option<Self> {
        match self {
            FieldValue::Date(date) => {
                let base = date.unwrap_or(today);
                let months = Months::new(delta.unsigned_abs());
                let moved = if delta >= 0 {
                    base.checked_add_months(months)
                } else {
                    base.checked_sub_months(months)
                };
                Some(FieldValue::Date(Some(moved.unwrap_or(base))))
            }
            _ => None,
        }
    }

    /// Jump a range to its minimum or maximum
    pub fn extreme(&self, to_max: bool) -> Option<Self> {
        match self {
            FieldValue::Expiration(_) => {
                let position = if to_max {
                    PASSWORD_EXPIRATION_MAX
                } else {
                    PASSWORD_EXPIRATION_MIN
                };
                Some(FieldValue::Expiration(PasswordExpiration::from_position(
                    i64::from(position),
                )))
            }
            _ => None,
        }
    }

    /// Clear the value, for the value kinds that can be empty
    pub fn cleared(&self) -> Option<Self> {
        match self {
            FieldValue::Text(_) => Some(FieldValue::Text(String::new())),
            FieldValue::Date(_) => Some(FieldValue::Date(None)),
            FieldValue::Integer(_) => Some(FieldValue::Integer(IntegerInput::parse(""))),
            _ => None,
        }
    }
}
