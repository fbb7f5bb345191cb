//! Money calculation utilities using rust_decimal for precision
//!
//! Totals are computed with `Decimal` and rounded half-up to two places.
//! Formatting follows the pt-BR currency layout used by the menu
//! (`R$ 1.234,50`) unless a different [`CurrencyFormat`] is supplied.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places (half-up)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Unit price times quantity, unrounded
#[inline]
pub fn line_total(unit: Decimal, quantity: u32) -> Decimal {
    unit * Decimal::from(quantity)
}

/// Order total: `food_price * food_quantity + Σ(value * quantity)` over the extras
pub fn cart_total<I>(food_price: Decimal, food_quantity: u32, extras: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    let extras_total: Decimal = extras
        .into_iter()
        .map(|(value, quantity)| line_total(value, quantity))
        .sum();

    round_money(line_total(food_price, food_quantity) + extras_total)
}

/// Currency display layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl CurrencyFormat {
    /// Brazilian real, `R$ 1.234,50`
    pub fn brl() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }

    /// US dollar, `$ 1,234.50`
    pub fn usd() -> Self {
        Self {
            symbol: "$".to_string(),
            decimal_separator: '.',
            thousands_separator: ',',
        }
    }

    pub fn format(&self, value: Decimal) -> String {
        let rounded = round_money(value);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let fixed = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        format!(
            "{sign}{} {grouped}{}{frac_part}",
            self.symbol, self.decimal_separator
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

/// Format with the default currency layout
pub fn format_value(value: Decimal) -> String {
    CurrencyFormat::default().format(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_total_with_extras() {
        // 10.00 * 2 + (2.00 * 3 + 1.50 * 1)
        let total = cart_total(
            Decimal::new(1000, 2),
            2,
            [(Decimal::new(200, 2), 3), (Decimal::new(150, 2), 1)],
        );
        assert_eq!(total, Decimal::new(2750, 2));
    }

    #[test]
    fn test_cart_total_without_extras() {
        let total = cart_total(Decimal::new(1990, 2), 1, std::iter::empty());
        assert_eq!(total, Decimal::new(1990, 2));
    }

    #[test]
    fn test_accumulation_precision() {
        // 0.1 * 3 must not drift like f64 does
        let total = cart_total(Decimal::ZERO, 1, [(Decimal::new(1, 1), 3)]);
        assert_eq!(total, Decimal::new(3, 1));
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(Decimal::new(10005, 3)), Decimal::new(1001, 2));
        assert_eq!(round_money(Decimal::new(10004, 3)), Decimal::new(1000, 2));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_value(Decimal::new(2750, 2)), "R$ 27,50");
        assert_eq!(format_value(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_value(Decimal::new(123450, 2)), "R$ 1.234,50");
        assert_eq!(format_value(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
        assert_eq!(format_value(Decimal::new(-500, 2)), "-R$ 5,00");
    }

    #[test]
    fn test_format_usd() {
        let fmt = CurrencyFormat::usd();
        assert_eq!(fmt.format(Decimal::new(1999, 2)), "$ 19.99");
        assert_eq!(fmt.format(Decimal::new(100000, 0)), "$ 100,000.00");
    }
}
