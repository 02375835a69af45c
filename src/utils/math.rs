//! Mathematical utility functions

use alloy::primitives::U256;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

pub fn pow10(n: i32) -> Decimal {
    match n {
        0 => dec!(1),
        6 => dec!(1_000_000),
        18 => dec!(1_000_000_000_000_000_000),
        _ => {
            let mut result = dec!(1);
            if n > 0 {
                for _ in 0..n {
                    result *= dec!(10);
                }
            } else {
                for _ in 0..(-n) {
                    result /= dec!(10);
                }
            }
            result
        }
    }
}

/// Raw integer amount to a human-readable decimal, for log lines only. Raw
/// amounts stay `U256` everywhere else; a value too large for `Decimal`
/// displays as zero rather than failing the log call.
pub fn format_units(amount: U256, decimals: i32) -> Decimal {
    Decimal::from_str(&amount.to_string()).unwrap_or_default() / pow10(decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_wei_to_ether() {
        let amount = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(format_units(amount, 18), dec!(1.5));
    }

    #[test]
    fn formats_usdc_units() {
        assert_eq!(format_units(U256::from(2_100_000_000u64), 6), dec!(2100));
    }
}
