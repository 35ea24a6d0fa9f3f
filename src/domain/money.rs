//! Money type
//!
//! Domain primitive for currency amounts in earnings reports.
//! Unlike a transfer amount, money in a report can be zero, but it can
//! never be negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use super::DomainError;

/// Share of revenue reported as pending, in percent.
///
/// Placeholder until payouts come from a real settlement system; the
/// remainder is reported as paid.
pub const PLACEHOLDER_PENDING_PERCENT: i64 = 10;

/// Money represents a non-negative currency amount.
///
/// # Invariants
/// - Value is always >= 0
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use course_earnings::domain::Money;
///
/// let price = Money::new(Decimal::new(4999, 2)).unwrap();
/// assert_eq!(price.to_string(), "49.99");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create a new Money value with validation.
    ///
    /// # Errors
    /// - `DomainError::InvalidAmount` if value < 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidAmount(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Create Money from a whole number of currency units.
    pub fn from_integer(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Read a price the way the catalog stores it.
    ///
    /// Numbers and numeric strings are accepted. Anything else, including
    /// negative prices, counts as a free course.
    pub fn from_json_lenient(value: &Value) -> Money {
        match parse_decimal(value).map(Money::new) {
            Some(Ok(money)) => money,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Negative price treated as zero");
                Money::ZERO
            }
            None => Money::ZERO,
        }
    }

    /// Multiply by a ratio in [0, 1]. The result cannot exceed `self`.
    pub fn scale_by(&self, ratio: Decimal) -> Money {
        Money(self.0 * ratio)
    }
}

/// Parse a JSON number or numeric string into a Decimal.
fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::InvalidAmount(format!("{s}: {e}")))?;
        Money::new(decimal)
    }
}

impl TryFrom<Value> for Money {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let decimal = parse_decimal(&value)
            .ok_or_else(|| DomainError::InvalidAmount(value.to_string()))?;
        Money::new(decimal)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Split of revenue into a pending and a paid share.
///
/// The two ratios always add up to one, so `pending + paid == revenue`
/// for every amount the split is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutSplit {
    pending_ratio: Decimal,
    paid_ratio: Decimal,
}

/// Pending and paid shares of one revenue figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub pending: Money,
    pub paid: Money,
}

impl PayoutSplit {
    /// Create a split from the pending ratio; the paid ratio is the rest.
    ///
    /// # Errors
    /// - `DomainError::InvalidRatio` if the ratio lies outside [0, 1]
    pub fn new(pending_ratio: Decimal) -> Result<Self, DomainError> {
        if pending_ratio < Decimal::ZERO || pending_ratio > Decimal::ONE {
            return Err(DomainError::invalid_ratio(pending_ratio));
        }
        Ok(Self {
            pending_ratio,
            paid_ratio: Decimal::ONE - pending_ratio,
        })
    }

    /// The placeholder policy: 10% pending, 90% paid.
    pub fn placeholder() -> Self {
        Self {
            pending_ratio: Decimal::new(PLACEHOLDER_PENDING_PERCENT, 2),
            paid_ratio: Decimal::new(100 - PLACEHOLDER_PENDING_PERCENT, 2),
        }
    }

    pub fn pending_ratio(&self) -> Decimal {
        self.pending_ratio
    }

    pub fn paid_ratio(&self) -> Decimal {
        self.paid_ratio
    }

    /// Derive both shares of `revenue`, each straight from the revenue.
    pub fn apply(&self, revenue: Money) -> Payout {
        Payout {
            pending: revenue.scale_by(self.pending_ratio),
            paid: revenue.scale_by(self.paid_ratio),
        }
    }
}

impl Default for PayoutSplit {
    fn default() -> Self {
        Self::placeholder()
    }
}
