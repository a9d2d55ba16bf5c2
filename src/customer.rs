//! Customer record as served by the backend, and the editable form record.
//!
//! The backend is loose about types, so decoding accepts whatever scalar it
//! finds: text fields take strings, numbers, booleans or null; numeric fields
//! take numbers or numeric strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One airline customer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "lenient_number")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub age: Option<i64>,
    #[serde(deserialize_with = "lenient_text")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_text")]
    pub passport_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(deserialize_with = "lenient_text")]
    pub flight_booked: String,
}

impl Customer {
    /// Wire name and display value of every field, in column order.
    pub fn entries(&self) -> [(&'static str, String); 7] {
        [
            ("id", opt_num(self.id)),
            ("name", self.name.clone()),
            ("age", opt_num(self.age)),
            ("gender", self.gender.clone()),
            ("passportNumber", self.passport_number.clone()),
            ("status", self.status.clone()),
            ("flightBooked", self.flight_booked.clone()),
        ]
    }
}

fn opt_num(v: Option<i64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn lenient_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

fn lenient_number<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Whole floats like `3.0` count; fractions and out-of-range values don't.
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    (f.fract() == 0.0 && f.abs() <= LIMIT).then_some(f as i64)
}

/// Fields of the add/edit form, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Id,
    Name,
    Age,
    Gender,
    PassportNumber,
    Status,
    FlightBooked,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Id,
        FormField::Name,
        FormField::Age,
        FormField::Gender,
        FormField::PassportNumber,
        FormField::Status,
        FormField::FlightBooked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::Name => "Name",
            FormField::Age => "Age",
            FormField::Gender => "Gender",
            FormField::PassportNumber => "Passport Number",
            FormField::Status => "Status",
            FormField::FlightBooked => "Flight Booked",
        }
    }

    /// Numeric inputs only take digits (and a leading minus).
    pub fn is_numeric(self) -> bool {
        matches!(self, FormField::Id | FormField::Age)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The in-progress form record. Every field is kept as typed text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub passport_number: String,
    pub status: String,
    pub flight_booked: String,
}

impl CustomerForm {
    pub fn from_customer(c: &Customer) -> Self {
        Self {
            id: opt_num(c.id),
            name: c.name.clone(),
            age: opt_num(c.age),
            gender: c.gender.clone(),
            passport_number: c.passport_number.clone(),
            status: c.status.clone(),
            flight_booked: c.flight_booked.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Gender => &self.gender,
            FormField::PassportNumber => &self.passport_number,
            FormField::Status => &self.status,
            FormField::FlightBooked => &self.flight_booked,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::Name => &mut self.name,
            FormField::Age => &mut self.age,
            FormField::Gender => &mut self.gender,
            FormField::PassportNumber => &mut self.passport_number,
            FormField::Status => &mut self.status,
            FormField::FlightBooked => &mut self.flight_booked,
        }
    }

    /// Append a typed character, honouring the numeric hint. Returns whether it was accepted.
    pub fn push_char(&mut self, field: FormField, c: char) -> bool {
        let value = self.get_mut(field);
        if field.is_numeric() && !accepts_numeric(value, c) {
            return false;
        }
        value.push(c);
        true
    }

    pub fn pop_char(&mut self, field: FormField) {
        self.get_mut(field).pop();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Request body for `/add` and `/update`.
    ///
    /// Numeric fields that do not parse are sent as `null`, the same way an
    /// empty number input would be.
    pub fn to_payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("id".into(), num_or_null(&self.id));
        body.insert("name".into(), Value::String(self.name.clone()));
        body.insert("age".into(), num_or_null(&self.age));
        body.insert("gender".into(), Value::String(self.gender.clone()));
        body.insert(
            "passportNumber".into(),
            Value::String(self.passport_number.clone()),
        );
        body.insert("status".into(), Value::String(self.status.clone()));
        body.insert(
            "flightBooked".into(),
            Value::String(self.flight_booked.clone()),
        );
        Value::Object(body)
    }
}

/// Whether `c` may be appended to a numeric input currently holding `current`.
pub fn accepts_numeric(current: &str, c: char) -> bool {
    c.is_ascii_digit() || (c == '-' && current.is_empty())
}

fn num_or_null(s: &str) -> Value {
    s.trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or(Value::Null)
}
