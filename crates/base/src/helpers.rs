use rust_decimal::{Decimal, RoundingStrategy};

use crate::entities::AMOUNT_DECIMAL_PLACES;

/// Formats a money amount the way the storefront displays it: two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    format!("{:.2}", rounded)
}

pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    #[allow(non_snake_case)]
    fn format_amount__integer_amount__should_pad_two_decimal_places() {
        assert_eq!(format_amount(dec!(35)), "35.00");
    }

    #[test]
    #[allow(non_snake_case)]
    fn format_amount__midpoint__should_round_away_from_zero() {
        assert_eq!(format_amount(dec!(10.005)), "10.01");
        assert_eq!(format_amount(dec!(19.994)), "19.99");
    }

    #[test]
    #[allow(non_snake_case)]
    fn non_empty__blank_string__should_return_none() {
        assert_eq!(non_empty(Some(String::from("  "))), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some(String::from("acme"))),
            Some(String::from("acme"))
        );
    }
}
