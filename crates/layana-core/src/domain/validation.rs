//! Form Values and Field Validation
//!
//! Editor forms hand over raw strings; drafts are parsed and checked here so
//! the UI only has to render the resulting field messages inline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 120;
pub const TEXT_MAX_LEN: usize = 2000;

/// One inline validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Message for `field`, if any
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

/// Raw form input keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }
}

/// Reads typed values out of [`FormValues`], collecting errors as it goes.
pub struct FormReader<'a> {
    values: &'a FormValues,
    errors: Vec<FieldError>,
}

impl<'a> FormReader<'a> {
    pub fn new(values: &'a FormValues) -> Self {
        Self {
            values,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Trimmed text, may be empty (length rules live in `validate`)
    pub fn text(&mut self, field: &str) -> String {
        self.values.get(field).trim().to_string()
    }

    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        let value = self.text(field);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Decimal price such as `12.50`, as integer cents
    pub fn cents(&mut self, field: &str) -> u64 {
        match parse_cents(self.values.get(field)) {
            Ok(cents) => cents,
            Err(message) => {
                self.fail(field, message);
                0
            }
        }
    }

    pub fn number(&mut self, field: &str) -> u32 {
        let raw = self.values.get(field).trim();
        match raw.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                self.fail(field, "must be a whole number");
                0
            }
        }
    }

    pub fn optional_number(&mut self, field: &str) -> Option<u32> {
        if self.values.get(field).trim().is_empty() {
            None
        } else {
            Some(self.number(field))
        }
    }

    /// `true`, `on`, `1` and `yes` count as checked
    pub fn flag(&mut self, field: &str) -> bool {
        matches!(
            self.values.get(field).trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    }

    /// One entry per non-blank line
    pub fn lines(&mut self, field: &str) -> Vec<String> {
        self.values
            .get(field)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Comma separated ids
    pub fn numbers(&mut self, field: &str) -> Vec<u32> {
        let mut out = Vec::new();
        for part in self.values.get(field).split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.parse::<u32>() {
                Ok(n) => out.push(n),
                Err(_) => {
                    self.fail(field, "must be a comma separated list of ids");
                    return Vec::new();
                }
            }
        }
        out
    }

    /// Returns parse errors if any, otherwise the value rules of `draft`.
    pub fn finish<D: super::Draft>(self, draft: D) -> Result<D, Vec<FieldError>> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        draft.validate()?;
        Ok(draft)
    }
}

/// Accumulates value-rule violations for `Draft::validate`.
#[derive(Default)]
pub struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str, max_len: usize) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "is required"));
        } else {
            self.max_len(field, value, max_len);
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max_len: usize) -> &mut Self {
        if value.chars().count() > max_len {
            self.errors.push(FieldError::new(
                field,
                format!("must be at most {} characters", max_len),
            ));
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: u32) -> &mut Self {
        if value == 0 {
            self.errors.push(FieldError::new(field, "must be greater than zero"));
        }
        self
    }

    pub fn scope(&mut self, field: &str, value: u32) -> &mut Self {
        if value == 0 {
            self.errors.push(FieldError::new(field, "must be selected"));
        }
        self
    }

    pub fn slug(&mut self, field: &str, value: &str) -> &mut Self {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            self.errors.push(FieldError::new(
                field,
                "may only contain lowercase letters, digits and '-'",
            ));
        }
        self
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

/// Parse a non-negative decimal with at most two fraction digits.
pub fn parse_cents(raw: &str) -> Result<u64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("is required");
    }
    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, f),
        None => (raw, ""),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err("must be a non-negative amount");
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err("must have at most two decimals");
    }
    let whole: u64 = whole.parse().map_err(|_| "is too large")?;
    let frac: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().map_err(|_| "is invalid")? * 10,
        _ => frac.parse().map_err(|_| "is invalid")?,
    };
    whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or("is too large")
}

pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
