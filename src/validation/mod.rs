//! Declarative payload schemas.
//!
//! A payload is read field by field from the raw JSON object (strings are
//! trimmed, email is lowercased), format rules run through `validator`
//! derives on the request DTOs, and every failure is reported in schema order
//! with one message per field.

pub mod contact_schema;
pub mod quote_schema;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

pub use contact_schema::{validate_create_contact, validate_update_contact};
pub use quote_schema::{validate_create_quote, validate_update_quote};

pub static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone number pattern is valid"));

/// Dotted domain ending in an alphabetic top-level label of at least two letters.
pub static EMAIL_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$")
        .expect("email domain pattern is valid")
});

const CHOICE_CODE: &str = "one_of";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Create schemas require fields; update schemas only check what is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Messages and normalization for one payload field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub lowercase: bool,
    pub allow_empty: bool,
    pub min_len: usize,
    pub required: &'static str,
    pub too_short: &'static str,
    pub too_long: &'static str,
    pub invalid: &'static str,
}

impl FieldRule {
    pub const BASE: FieldRule = FieldRule {
        name: "",
        label: "",
        lowercase: false,
        allow_empty: false,
        min_len: 0,
        required: "",
        too_short: "",
        too_long: "",
        invalid: "",
    };

    fn message_for(&self, code: &str, value: Option<&str>, mode: Mode) -> String {
        let value = value.unwrap_or_default();
        let empty = value.is_empty() && !self.allow_empty;
        if code == "required" || (mode == Mode::Create && empty) {
            return self.required.to_string();
        }
        // Choice fields report the choice message even when blank
        if mode == Mode::Update && empty && code != CHOICE_CODE {
            return format!("\"{}\" is not allowed to be empty", self.name);
        }
        let message = match code {
            "length" if value.chars().count() < self.min_len => self.too_short,
            "length" => self.too_long,
            _ => self.invalid,
        };
        message.to_string()
    }
}

/// The ordered field set of one payload shape.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

impl Schema {
    fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    /// Reads the known string fields out of a JSON object.
    pub fn read(&self, payload: &Value) -> Result<RawPayload, Vec<FieldError>> {
        let Some(object) = payload.as_object() else {
            return Err(vec![FieldError::new("body", "Request body must be a JSON object")]);
        };
        let mut raw = RawPayload::default();
        for (key, value) in object {
            let Some(rule) = self.rule(key) else {
                raw.unknown.push(FieldError::new(key.clone(), format!("\"{key}\" is not allowed")));
                continue;
            };
            match value.as_str() {
                Some(s) => {
                    let trimmed = s.trim();
                    let normalized = if rule.lowercase {
                        trimmed.to_lowercase()
                    } else {
                        trimmed.to_string()
                    };
                    raw.values.insert(rule.name, normalized);
                }
                None => {
                    raw.type_errors
                        .insert(rule.name, format!("{} must be a string", rule.label));
                }
            }
        }
        Ok(raw)
    }

    /// Merges read errors and rule violations into one ordered list.
    pub fn report(&self, raw: &RawPayload, errors: &ValidationErrors, mode: Mode) -> Vec<FieldError> {
        let field_errors = errors.field_errors();
        let mut report = Vec::new();
        for rule in self.fields {
            if let Some(message) = raw.type_errors.get(rule.name) {
                report.push(FieldError::new(rule.name, message.clone()));
                continue;
            }
            if let Some(first) = field_errors.get(rule.name).and_then(|errs| errs.first()) {
                let message = rule.message_for(first.code.as_ref(), raw.get(rule.name), mode);
                report.push(FieldError::new(rule.name, message));
            }
        }
        report.extend(raw.unknown.iter().cloned());
        report
    }
}

/// Normalized string values read from a payload, before rule checks.
#[derive(Debug, Default)]
pub struct RawPayload {
    values: HashMap<&'static str, String>,
    type_errors: HashMap<&'static str, String>,
    unknown: Vec<FieldError>,
}

impl RawPayload {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_owned)
    }
}

/// Parses an enumeration field, recording an error when the value is not allowed.
pub fn check_choice<T: FromStr>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<T> {
    let value = value?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            let mut error = ValidationError::new(CHOICE_CODE);
            error.message = Some(Cow::Borrowed("value is not one of the allowed choices"));
            errors.add(field, error);
            None
        }
    }
}
