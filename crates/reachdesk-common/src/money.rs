//! Money in minor currency units.
//!
//! Budgets and prices travel as integer cents end to end; floating point
//! only appears in derived metrics, never in amounts.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Signed amount in minor units (cents).
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub fn new(value: i64) -> Self {
        Cents(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Cents {
    type Output = Cents;
    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<u32> for Cents {
    type Output = Cents;
    fn mul(self, quantity: u32) -> Cents {
        Cents(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Cents {
        iter.copied().sum()
    }
}

/// Display currency for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code, e.g. "USD"
    pub code: String,
    pub symbol: String,
}

impl Currency {
    /// Build a currency from its ISO code. Unknown codes use the code itself as symbol.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        let symbol = match code.as_str() {
            "USD" | "AUD" | "CAD" | "NZD" | "SGD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "INR" => "₹",
            "JPY" => "¥",
            _ => "",
        };
        let symbol = if symbol.is_empty() { format!("{} ", code) } else { symbol.to_string() };
        Self { code, symbol }
    }

    /// Render an amount as `$1,234.50`.
    pub fn format(&self, amount: Cents) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let abs = amount.0.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        format!("{}{}{}.{:02}", sign, self.symbol, group_thousands(major), minor)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::from_code("USD")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_arithmetic() {
        let unit = Cents(12_500);
        assert_eq!(unit * 3, Cents(37_500));
        let total: Cents = vec![Cents(100), Cents(250), Cents(-50)].into_iter().sum();
        assert_eq!(total, Cents(300));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Cents(i64::MAX / 2 + 1);
        assert_eq!(huge + huge, Cents(i64::MAX));
        assert_eq!(Cents(i64::MAX / 5) * 10, Cents(i64::MAX));
        assert_eq!(Cents(i64::MIN) + Cents(-1), Cents(i64::MIN));

        let mut acc = Cents(i64::MAX);
        acc += Cents(1);
        assert_eq!(acc, Cents(i64::MAX));
        let total: Cents = [huge, huge, Cents(-5)].iter().sum();
        assert_eq!(total, Cents(i64::MAX - 5));
    }

    #[test]
    fn test_format_usd() {
        let usd = Currency::from_code("usd");
        assert_eq!(usd.format(Cents(123_450)), "$1,234.50");
        assert_eq!(usd.format(Cents(5)), "$0.05");
        assert_eq!(usd.format(Cents(-100_000_00)), "-$100,000.00");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        let chf = Currency::from_code("CHF");
        assert_eq!(chf.format(Cents(1_000)), "CHF 10.00");
    }
}
