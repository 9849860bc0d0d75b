//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    10.00 - 9.99 = 0.009999999999999787  ❌ WRONG!                       │
//! │                                                                         │
//! │  At the cash desk that turns "exact change" into "1 cent short".        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1000 cents - 999 cents = 1 cent, always                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cashdesk_core::money::Money;
//!
//! // Operator input goes through validation
//! assert!(Money::is_value_valid("19.99"));
//! assert!(!Money::is_value_valid("abc"));
//!
//! let due = Money::from_cents(1000);
//! let tendered = Money::create("5").unwrap();
//! assert_eq!(due.subtract(tendered).format(true), "+5.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::validation::{validate_amount_text, ValidationResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: change due is negative once the customer overpays
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Equality**: two values are equal iff their cent amounts are equal
/// - **Saturating arithmetic**: results clamp at the i64 bounds
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  amount due ──┐                                                         │
/// │               ├──► subtract ──► change due ──► "+5.00" / "-2.50"        │
/// │  tendered  ───┘                     │                                   │
/// │  ("12,50")                          └──► is_less_or_equal_zero()        │
/// │                                          = sufficient funds             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cashdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        let units = major.saturating_mul(100);
        if major < 0 {
            Money(units.saturating_sub(minor))
        } else {
            Money(units.saturating_add(minor))
        }
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is zero or below.
    ///
    /// Applied to change due, this is the "sufficient funds" predicate.
    #[inline]
    pub const fn is_less_or_equal_zero(&self) -> bool {
        self.0 <= 0
    }

    /// Subtracts `other` from this value. The result may be negative and
    /// clamps at the i64 bounds.
    #[inline]
    pub const fn subtract(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Checks whether `text` is a valid textual amount.
    ///
    /// ## Accepted Input
    /// ```text
    /// "12"  "12.5"  "12.50"  "12,50"  ".50"  "12."  " 12.50 "
    /// ```
    /// Signs, letters, grouping characters and more than two decimal
    /// places are rejected.
    pub fn is_value_valid(text: &str) -> bool {
        validate_amount_text(text).is_ok()
    }

    /// Creates a Money value from a textual amount.
    ///
    /// Fails exactly when [`Money::is_value_valid`] returns false.
    ///
    /// ## Example
    /// ```rust
    /// use cashdesk_core::money::Money;
    ///
    /// assert_eq!(Money::create("12,5").unwrap().cents(), 1250);
    /// assert!(Money::create("12.505").is_err());
    /// ```
    pub fn create(text: &str) -> ValidationResult<Money> {
        validate_amount_text(text)
    }

    /// Renders the amount as `units.cc`.
    ///
    /// ## Sign Handling
    /// ```text
    /// ┌──────────────┬──────────────────┬──────────────────┐
    /// │  value       │ format(false)    │ format(true)     │
    /// ├──────────────┼──────────────────┼──────────────────┤
    /// │  500         │ "5.00"           │ "+5.00"          │
    /// │  0           │ "0.00"           │ "0.00"           │
    /// │  -250        │ "-2.50"          │ "-2.50"          │
    /// └──────────────┴──────────────────┴──────────────────┘
    /// ```
    pub fn format(&self, show_sign: bool) -> String {
        let sign = if self.0 < 0 {
            "-"
        } else if show_sign && self.0 > 0 {
            "+"
        } else {
            ""
        };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::create(s)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
