//! Small input checks shared by the domain modules.

use rust_decimal::Decimal;

use crate::errors::{Error, Result, ValidationError};

pub fn ensure_positive(field: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

/// Returns the trimmed value, or a missing-field error when it is blank.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(trimmed.to_string())
}
