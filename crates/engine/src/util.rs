//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::Validation(format!("invalid {label} id")))
}

/// Trim a required description.
pub(crate) fn required_description(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} description must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim and upper-case a required description.
pub(crate) fn normalize_description(value: &str, label: &str) -> ResultEngine<String> {
    required_description(value, label).map(|s| s.to_uppercase())
}

/// Amounts must be finite and non-negative; direction is carried by types.
pub(crate) fn validate_amount(amount: f64, label: &str) -> ResultEngine<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::Validation(format!(
            "invalid {label} amount: {amount}"
        )));
    }
    Ok(())
}

/// Due days are days of the month.
pub(crate) fn validate_due_day(due_day: u32, label: &str) -> ResultEngine<()> {
    if !(1..=31).contains(&due_day) {
        return Err(EngineError::Validation(format!(
            "invalid {label} due day: {due_day}"
        )));
    }
    Ok(())
}

/// Ledger movements carry whole units; fractional parts are dropped.
pub(crate) fn movement_amount(amount: f64) -> i64 {
    amount.trunc() as i64
}
