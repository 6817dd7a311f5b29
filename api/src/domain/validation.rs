use once_cell::sync::Lazy;
use regex::Regex;

static AADHAAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{12}$").expect("valid aadhaar regex"));

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn require_text(field: &'static str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

// Patches carry Option<String>; only a provided-but-blank value is rejected.
pub fn optional_text(
    field: &'static str,
    value: Option<&String>,
    message: &str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => require_text(field, v, message),
        None => Ok(()),
    }
}

pub fn require_amount(field: &'static str, value: f64, message: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

pub fn is_aadhaar(value: &str) -> bool {
    AADHAAR_RE.is_match(value.trim())
}
