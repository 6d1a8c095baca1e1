// SPDX-License-Identifier: MIT

//! Reading models: the form input, the generated reading, and the stored
//! record combining both.
//!
//! Input validation lives here too. It is total and synchronous: every
//! failing field is reported, with the wire-level (camelCase) field name,
//! joined into one human-readable details string.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Strict calendar-date pattern. Syntactic only: `2024-02-30` passes.
static BIRTH_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Strict 24-hour clock pattern. Rejects `99:99`.
static BIRTH_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap());

/// User form submission. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[validate(custom(function = validate_name))]
    pub name: String,
    /// ISO calendar date, YYYY-MM-DD
    #[validate(regex(path = *BIRTH_DATE_RE, message = "Invalid date format (use YYYY-MM-DD)"))]
    pub birth_date: String,
    /// Optional, HH:mm (24-hour)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *BIRTH_TIME_RE, message = "Invalid time format (use HH:mm)"))]
    pub birth_time: Option<String>,
    #[validate(custom(function = validate_birth_city))]
    pub birth_city: String,
    /// Optional, max 200 chars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "Focus area too long (max 200 characters)"))]
    pub focus_area: Option<String>,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    required_bounded(name, 100, "Name is required", "Name too long")
}

fn validate_birth_city(city: &str) -> Result<(), ValidationError> {
    required_bounded(city, 100, "Birth city is required", "City name too long")
}

fn required_bounded(
    value: &str,
    max: usize,
    empty_msg: &'static str,
    long_msg: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(empty_msg.into());
        return Err(err);
    }
    if value.chars().count() > max {
        let mut err = ValidationError::new("length");
        err.message = Some(long_msg.into());
        return Err(err);
    }
    Ok(())
}

impl UserInput {
    /// Validate and normalize a raw submission.
    ///
    /// Trims the free-text fields, then checks every rule; failures come
    /// back as a single `InvalidInput` with `field: message` pairs joined
    /// by commas, wire field names included.
    pub fn validated(mut self) -> Result<Self, AppError> {
        self.name = self.name.trim().to_string();
        self.birth_city = self.birth_city.trim().to_string();
        self.focus_area = self.focus_area.map(|f| f.trim().to_string());

        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(AppError::InvalidInput(format_validation_errors(&errors))),
        }
    }
}

/// Fixed field order so the joined details string is deterministic.
const FIELD_ORDER: [&str; 5] = ["name", "birth_date", "birth_time", "birth_city", "focus_area"];

/// Map a struct field name to its wire (camelCase) name.
fn wire_field_name(field: &str) -> &str {
    match field {
        "birth_date" => "birthDate",
        "birth_time" => "birthTime",
        "birth_city" => "birthCity",
        "focus_area" => "focusArea",
        other => other,
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut parts = Vec::new();

    for field in FIELD_ORDER {
        if let Some(errs) = field_errors.get(field) {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_deref()
                    .unwrap_or(err.code.as_ref())
                    .to_string();
                parts.push(format!("{}: {}", wire_field_name(field), message));
            }
        }
    }

    parts.join(", ")
}

/// Generated reading. Treated as opaque generated content; the response
/// parser checks key presence and array cardinalities, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingResponse {
    pub headline: String,
    pub core_theme: String,
    /// Exactly 3 short entries
    pub strengths: Vec<String>,
    /// Exactly 2 short entries
    pub watch_outs: Vec<String>,
    /// Exactly 3 verb-led entries
    #[serde(rename = "next7Days")]
    pub next7_days: Vec<String>,
    pub journal_prompt: String,
    pub disclaimer: String,
}

/// A persisted reading. Append-only: a regenerate creates a new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReading {
    pub reading_id: Uuid,
    pub inputs: UserInput,
    pub reading: ReadingResponse,
    pub created_at: DateTime<Utc>,
    /// Owning user, if the reading was generated while signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> UserInput {
        UserInput {
            name: "Ada".to_string(),
            birth_date: "1990-01-01".to_string(),
            birth_time: None,
            birth_city: "London, UK".to_string(),
            focus_area: None,
        }
    }

    #[test]
    fn accepts_valid_input() {
        let input = valid_input().validated().unwrap();
        assert_eq!(input.name, "Ada");
        assert_eq!(input.birth_date, "1990-01-01");
    }

    #[test]
    fn accepts_optional_fields() {
        let mut input = valid_input();
        input.birth_time = Some("14:30".to_string());
        input.focus_area = Some("career change".to_string());
        assert!(input.validated().is_ok());
    }

    #[test]
    fn trims_name_and_city() {
        let mut input = valid_input();
        input.name = "  Ada  ".to_string();
        input.birth_city = " London ".to_string();
        let input = input.validated().unwrap();
        assert_eq!(input.name, "Ada");
        assert_eq!(input.birth_city, "London");
    }

    #[test]
    fn rejects_empty_name() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        let err = input.validated().unwrap_err();
        match err {
            AppError::InvalidInput(details) => {
                assert!(details.contains("name: Name is required"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let mut input = valid_input();
        input.name = "a".repeat(101);
        let err = input.validated().unwrap_err();
        match err {
            AppError::InvalidInput(details) => {
                assert!(details.contains("name: Name too long"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_date_format() {
        let mut input = valid_input();
        input.birth_date = "01/01/1990".to_string();
        let err = input.validated().unwrap_err();
        match err {
            AppError::InvalidInput(details) => {
                assert!(details.contains("birthDate:"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn date_check_is_syntactic_only() {
        // No semantic calendar validation: Feb 30 passes the pattern.
        let mut input = valid_input();
        input.birth_date = "2024-02-30".to_string();
        assert!(input.validated().is_ok());
    }

    #[test]
    fn rejects_out_of_range_time() {
        let mut input = valid_input();
        input.birth_time = Some("99:99".to_string());
        let err = input.validated().unwrap_err();
        match err {
            AppError::InvalidInput(details) => {
                assert!(details.contains("birthTime:"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_overlong_focus_area() {
        let mut input = valid_input();
        input.focus_area = Some("x".repeat(201));
        let err = input.validated().unwrap_err();
        match err {
            AppError::InvalidInput(details) => {
                assert!(details.contains("focusArea:"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_every_failing_field() {
        let input = UserInput {
            name: String::new(),
            birth_date: "bad".to_string(),
            birth_time: Some("25:00".to_string()),
            birth_city: String::new(),
            focus_area: None,
        };
        let err = input.validated().unwrap_err();
        match err {
            AppError::InvalidInput(details) => {
                assert!(details.contains("name:"), "{details}");
                assert!(details.contains("birthDate:"), "{details}");
                assert!(details.contains("birthTime:"), "{details}");
                assert!(details.contains("birthCity:"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn user_input_uses_camel_case_on_the_wire() {
        let json = serde_json::json!({
            "name": "Ada",
            "birthDate": "1990-01-01",
            "birthCity": "London, UK"
        });
        let input: UserInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.birth_date, "1990-01-01");
        assert_eq!(input.birth_city, "London, UK");

        let out = serde_json::to_value(&input).unwrap();
        assert!(out.get("birthDate").is_some());
        assert!(out.get("birth_date").is_none());
    }
}
