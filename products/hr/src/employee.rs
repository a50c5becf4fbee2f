//! Employee records as stored in the register.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use uuid::Uuid;

use crate::error::HrError;

/// Opaque record identity. Generated once at creation and never edited.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

/// Older snapshots carry numeric ids; they load as their decimal text.
impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match scalar_text(Value::deserialize(deserializer)?) {
            Some(id) if !id.is_empty() => Ok(Self(id)),
            _ => Err(D::Error::custom("employee id must be a non-empty JSON scalar")),
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Field values accept any JSON scalar; `null` reads as empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        value => scalar_text(value)
            .ok_or_else(|| D::Error::custom("employee field must be a string, number or bool")),
    }
}

impl EmployeeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user-editable fields of a record, in table column order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeField {
    FirstName,
    LastName,
    DateOfBirth,
    StartDate,
    Street,
    City,
    State,
    ZipCode,
    Department,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 9] = [
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::DateOfBirth,
        EmployeeField::StartDate,
        EmployeeField::Street,
        EmployeeField::City,
        EmployeeField::State,
        EmployeeField::ZipCode,
        EmployeeField::Department,
    ];

    /// Wire name used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeField::FirstName => "firstName",
            EmployeeField::LastName => "lastName",
            EmployeeField::DateOfBirth => "dateOfBirth",
            EmployeeField::StartDate => "startDate",
            EmployeeField::Street => "street",
            EmployeeField::City => "city",
            EmployeeField::State => "state",
            EmployeeField::ZipCode => "zipCode",
            EmployeeField::Department => "department",
        }
    }

    /// Column header, e.g. `Date Of Birth`.
    pub fn label(self) -> String {
        split_camel_case(self.as_str())
    }

    pub fn is_date(self) -> bool {
        matches!(self, EmployeeField::DateOfBirth | EmployeeField::StartDate)
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeField {
    type Err = HrError;

    /// Accepts the wire name as well as kebab or snake spellings
    /// (`startDate`, `start-date`, `start_date`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        EmployeeField::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == folded)
            .ok_or_else(|| HrError::UnknownField(raw.to_string()))
    }
}

/// Splits a camelCase identifier into capitalized words.
pub fn split_camel_case(ident: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for c in ident.chars() {
        if c.is_uppercase() || words.is_empty() {
            words.push(String::new());
        }
        if let Some(word) = words.last_mut() {
            word.push(c);
        }
    }
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Field values of one employee. Missing keys in a snapshot load as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeFields {
    #[serde(deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub street: String,
    #[serde(deserialize_with = "lenient_text")]
    pub city: String,
    #[serde(deserialize_with = "lenient_text")]
    pub state: String,
    #[serde(deserialize_with = "lenient_text")]
    pub zip_code: String,
    #[serde(deserialize_with = "lenient_text")]
    pub department: String,
}

impl EmployeeFields {
    pub fn get(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::FirstName => &self.first_name,
            EmployeeField::LastName => &self.last_name,
            EmployeeField::DateOfBirth => &self.date_of_birth,
            EmployeeField::StartDate => &self.start_date,
            EmployeeField::Street => &self.street,
            EmployeeField::City => &self.city,
            EmployeeField::State => &self.state,
            EmployeeField::ZipCode => &self.zip_code,
            EmployeeField::Department => &self.department,
        }
    }

    pub fn get_mut(&mut self, field: EmployeeField) -> &mut String {
        match field {
            EmployeeField::FirstName => &mut self.first_name,
            EmployeeField::LastName => &mut self.last_name,
            EmployeeField::DateOfBirth => &mut self.date_of_birth,
            EmployeeField::StartDate => &mut self.start_date,
            EmployeeField::Street => &mut self.street,
            EmployeeField::City => &mut self.city,
            EmployeeField::State => &mut self.state,
            EmployeeField::ZipCode => &mut self.zip_code,
            EmployeeField::Department => &mut self.department,
        }
    }

    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmployeeField, &str)> + '_ {
        EmployeeField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl FromIterator<(EmployeeField, String)> for EmployeeFields {
    fn from_iter<I: IntoIterator<Item = (EmployeeField, String)>>(iter: I) -> Self {
        let mut fields = EmployeeFields::default();
        for (field, value) in iter {
            fields.set(field, value);
        }
        fields
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub fields: EmployeeFields,
}

impl Employee {
    pub fn new(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, field: EmployeeField) -> &str {
        self.fields.get(field)
    }

    /// Every value a search query is matched against, identity included.
    pub fn searchable_values(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.id.as_str()).chain(self.fields.iter().map(|(_, value)| value))
    }
}
