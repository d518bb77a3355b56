//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents/kopecks) to avoid
//! floating-point precision issues. An amount is always strictly positive;
//! the direction of a cash flow is carried by the transaction kind, not by
//! the sign of the amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 3-letter currency code (e.g. RUB, USD, EUR)
///
/// Stored as three uppercase ASCII letters so the whole [`Money`] value
/// stays `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// Parse a currency code, validating it is exactly three ASCII letters
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        // Validated as ASCII on construction
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_string()
    }
}

/// A positive monetary amount in a specific currency
///
/// The amount is stored in minor units (hundredths of the currency unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
    currency: Currency,
}

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is zero or negative.
    pub fn new(cents: i64, currency: Currency) -> Result<Self, MoneyError> {
        if cents <= 0 {
            return Err(MoneyError::NonPositiveAmount);
        }
        Ok(Self { cents, currency })
    }

    /// Parse a decimal amount string (e.g. "10.50") with a currency code
    ///
    /// Accepts formats: "10.50", "10.5", "10". Negative or zero amounts
    /// are rejected.
    pub fn parse(amount: &str, currency: &str) -> Result<Self, MoneyError> {
        let currency = Currency::new(currency)?;
        let cents = parse_decimal_cents(amount)?;
        Self::new(cents, currency)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Get the currency code
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Get the whole units portion
    pub const fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Get the minor units portion (0-99)
    pub const fn subunits(&self) -> i64 {
        self.cents % 100
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02} {}", self.units(), self.subunits(), self.currency)
    }
}

/// Parse a decimal string into minor units
fn parse_decimal_cents(s: &str) -> Result<i64, MoneyError> {
    let s = s.trim();
    if s.is_empty() || s.starts_with('+') {
        return Err(MoneyError::InvalidFormat(s.to_string()));
    }
    if s.starts_with('-') {
        // Negative input fails the positivity invariant, not the format
        return Err(MoneyError::NonPositiveAmount);
    }

    let cents = if let Some((units, frac)) = s.split_once('.') {
        let units: i64 = units
            .parse()
            .map_err(|_| MoneyError::InvalidFormat(s.to_string()))?;
        let frac_cents: i64 = match frac.len() {
            1 => {
                frac.parse::<i64>()
                    .map_err(|_| MoneyError::InvalidFormat(s.to_string()))?
                    * 10
            }
            2 => frac
                .parse()
                .map_err(|_| MoneyError::InvalidFormat(s.to_string()))?,
            _ => return Err(MoneyError::InvalidFormat(s.to_string())),
        };
        units * 100 + frac_cents
    } else {
        s.parse::<i64>()
            .map_err(|_| MoneyError::InvalidFormat(s.to_string()))?
            * 100
    };

    Ok(cents)
}

/// Format a raw minor-unit total for display (totals may legitimately be zero)
pub fn format_cents(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, currency)
}

/// Validation errors for monetary values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    NonPositiveAmount,
    InvalidCurrency(String),
    InvalidFormat(String),
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            MoneyError::InvalidCurrency(s) => {
                write!(f, "Currency must be a 3-letter code (e.g. RUB), got '{}'", s)
            }
            MoneyError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for MoneyError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rub() -> Currency {
        Currency::new("RUB").unwrap()
    }

    #[test]
    fn test_new_positive_amount() {
        let m = Money::new(1050, rub()).unwrap();
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.subunits(), 50);
    }

    #[test]
    fn test_rejects_zero_amount() {
        assert_eq!(Money::new(0, rub()), Err(MoneyError::NonPositiveAmount));
    }

    #[test]
    fn test_rejects_negative_amount() {
        assert_eq!(Money::new(-100, rub()), Err(MoneyError::NonPositiveAmount));
    }

    #[test]
    fn test_currency_validation() {
        assert!(Currency::new("RUB").is_ok());
        assert!(Currency::new("usd").is_ok());
        assert!(Currency::new("RU").is_err());
        assert!(Currency::new("RUBL").is_err());
        assert!(Currency::new("R1B").is_err());
        assert!(Currency::new("").is_err());
    }

    #[test]
    fn test_currency_uppercased() {
        assert_eq!(Currency::new("usd").unwrap().as_str(), "USD");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50", "RUB").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.5", "RUB").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10", "RUB").unwrap().cents(), 1000);
        assert_eq!(Money::parse("0.05", "RUB").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_negative_and_zero() {
        assert_eq!(
            Money::parse("-10.50", "RUB"),
            Err(MoneyError::NonPositiveAmount)
        );
        assert_eq!(Money::parse("0", "RUB"), Err(MoneyError::NonPositiveAmount));
        assert_eq!(
            Money::parse("0.00", "RUB"),
            Err(MoneyError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse("ten", "RUB"),
            Err(MoneyError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse("10.505", "RUB"),
            Err(MoneyError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse("", "RUB"),
            Err(MoneyError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        let m = Money::new(1050, rub()).unwrap();
        assert_eq!(format!("{}", m), "10.50 RUB");

        let m = Money::new(5, rub()).unwrap();
        assert_eq!(format!("{}", m), "0.05 RUB");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0, "RUB"), "0.00 RUB");
        assert_eq!(format_cents(1050, "RUB"), "10.50 RUB");
        assert_eq!(format_cents(-1050, "RUB"), "-10.50 RUB");
    }

    #[test]
    fn test_serialization() {
        let m = Money::new(1050, rub()).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"cents":1050,"currency":"RUB"}"#);

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_deserialization_rejects_bad_currency() {
        let result: Result<Money, _> = serde_json::from_str(r#"{"cents":100,"currency":"RU"}"#);
        assert!(result.is_err());
    }
}
