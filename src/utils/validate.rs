use chrono::{DateTime, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Deserializes a request body into a payload type.
///
/// Payload structs declare `deny_unknown_fields`, so any field outside the
/// declared shape (and any type mismatch) fails here with a 400 before the
/// rule table runs. Missing fields pass: every payload field is an `Option`
/// and required-ness is a rule-table concern, so all violations aggregate.
pub fn parse_payload<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
}

/// Accumulated constraint violations for one request body.
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Violations::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.items.push(format!("{field} {message}"));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One aggregated 400 listing every violated constraint, or Ok.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ApiError::BadRequest(self.items.join("; ")))
        }
    }
}

/// Declarative rule set of a payload type. `prefix` carries the dotted path
/// into nested payloads (e.g. `userLogin.email`).
///
/// `check` must run every rule before combining results, so one missing field
/// does not mask the others; it returns the strongly-typed value only when
/// nothing was violated.
pub trait ValidateBody {
    type Output;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<Self::Output>;
}

/// Runs a payload's rule table; must be called before any persistence
/// mutation. Yields the typed payload on success, one aggregated 400
/// otherwise.
pub fn validate_body<T: ValidateBody>(dto: &T) -> Result<T::Output, ApiError> {
    let mut violations = Violations::new();
    let output = dto.check("", &mut violations);
    violations.into_result()?;
    output.ok_or_else(|| ApiError::Internal("validation passed without a value".into()))
}

pub fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Required non-empty string; returns the trimmed value when present.
pub fn require_string<'a>(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    let path = field_path(prefix, field);
    match value.as_deref().map(str::trim) {
        None => {
            violations.add(&path, "is required");
            None
        }
        Some("") => {
            violations.add(&path, "must not be empty");
            None
        }
        Some(v) => Some(v),
    }
}

pub fn check_email<'a>(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    let email = require_string(violations, prefix, field, value)?;
    if is_email(email) {
        Some(email)
    } else {
        violations.add(&field_path(prefix, field), "must be a valid email address");
        None
    }
}

pub fn check_uuid(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &Option<String>,
) -> Option<Uuid> {
    let raw = require_string(violations, prefix, field, value)?;
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            violations.add(&field_path(prefix, field), "must be a valid UUID");
            None
        }
    }
}

/// Required RFC 3339 date-time (a bare `YYYY-MM-DDTHH:MM:SS` is accepted too).
pub fn check_datetime(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &Option<String>,
) -> Option<NaiveDateTime> {
    let raw = require_string(violations, prefix, field, value)?;
    match parse_datetime(raw) {
        Some(ts) => Some(ts),
        None => {
            violations.add(&field_path(prefix, field), "must be a valid RFC 3339 date-time");
            None
        }
    }
}

/// Optional variant of [`check_datetime`]: absent is fine, malformed is not.
pub fn check_datetime_opt(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &Option<String>,
) -> Option<NaiveDateTime> {
    let raw = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    match parse_datetime(raw) {
        Some(ts) => Some(ts),
        None => {
            violations.add(&field_path(prefix, field), "must be a valid RFC 3339 date-time");
            None
        }
    }
}

/// Required membership in a closed set of names.
pub fn check_member(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &Option<String>,
    allowed: &[&str],
) -> Option<String> {
    let raw = require_string(violations, prefix, field, value)?;
    if allowed.contains(&raw) {
        Some(raw.to_string())
    } else {
        violations.add(
            &field_path(prefix, field),
            &format!("must be one of: {}", allowed.join(", ")),
        );
        None
    }
}

/// Required nested payload, validated recursively under a dotted path.
pub fn check_nested<T: ValidateBody>(
    violations: &mut Violations,
    prefix: &str,
    field: &str,
    value: &Option<T>,
) -> Option<T::Output> {
    let path = field_path(prefix, field);
    match value {
        None => {
            violations.add(&path, "is required");
            None
        }
        Some(nested) => nested.check(&path, violations),
    }
}

/// Path-parameter guard: malformed ids fail before any lookup runs.
pub fn parse_uuid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid UUID".into()))
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
