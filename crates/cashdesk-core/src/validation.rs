//! # Validation Module
//!
//! Rules for amount text typed at the cash desk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tendered Text Flow                                 │
//! │                                                                         │
//! │  Operator types "12,5"                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  normalize_tendered_text  ── "" becomes "0"                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_amount_text     ── THIS MODULE                                │
//! │           │                                                             │
//! │           ├── Err(..) → controller shows error marker                   │
//! │           │                                                             │
//! │           └── Ok(Money(1250)) → controller computes change              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::MAX_AMOUNT_DIGITS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const AMOUNT_FIELD: &str = "amount";

fn invalid_format(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: AMOUNT_FIELD.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Amount Text
// =============================================================================

/// Maps empty tendered text to `"0"`.
///
/// An empty field means nothing was tendered yet; that is not an error.
pub fn normalize_tendered_text(text: &str) -> &str {
    if text.is_empty() {
        "0"
    } else {
        text
    }
}

/// Validates an amount text and converts it to [`Money`].
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - At most [`MAX_AMOUNT_DIGITS`] digits before the separator
/// - `.` or `,` as decimal separator, followed by at most two digits
/// - At least one digit overall
/// - No sign, no grouping characters
///
/// ## Example
/// ```rust
/// use cashdesk_core::validation::validate_amount_text;
///
/// assert_eq!(validate_amount_text("3,05").unwrap().cents(), 305);
/// assert_eq!(validate_amount_text("3.5").unwrap().cents(), 350);
/// assert!(validate_amount_text("-3").is_err());
/// assert!(validate_amount_text("1.000,00").is_err());
/// ```
pub fn validate_amount_text(text: &str) -> ValidationResult<Money> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: AMOUNT_FIELD.to_string(),
        });
    }

    let (units, fraction) = match text.find(|c: char| c == '.' || c == ',') {
        Some(idx) => (&text[..idx], &text[idx + 1..]),
        None => (text, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(units) || !all_digits(fraction) {
        return Err(invalid_format(
            "must contain only digits and one decimal separator",
        ));
    }

    if units.is_empty() && fraction.is_empty() {
        return Err(invalid_format("must contain at least one digit"));
    }

    if fraction.len() > 2 {
        return Err(invalid_format("must have at most two decimal places"));
    }

    if units.len() > MAX_AMOUNT_DIGITS {
        return Err(ValidationError::TooLong {
            field: AMOUNT_FIELD.to_string(),
            max: MAX_AMOUNT_DIGITS,
        });
    }

    // Both parts are short ASCII digit runs here, parsing cannot overflow
    let major = if units.is_empty() {
        0
    } else {
        units
            .parse::<i64>()
            .map_err(|_| invalid_format("whole part is not a number"))?
    };
    let minor = match fraction.len() {
        0 => 0,
        1 => {
            fraction
                .parse::<i64>()
                .map_err(|_| invalid_format("decimal part is not a number"))?
                * 10
        }
        _ => fraction
            .parse::<i64>()
            .map_err(|_| invalid_format("decimal part is not a number"))?,
    };

    Ok(Money::from_major_minor(major, minor))
}

/// Parses the amount a payment should collect.
///
/// Same grammar as tendered text, and additionally the amount must be
/// greater than zero.
pub fn parse_amount_due(text: &str) -> CoreResult<Money> {
    let amount = validate_amount_text(text)?;
    if amount.is_less_or_equal_zero() {
        return Err(CoreError::InvalidAmountDue { amount });
    }
    Ok(amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
