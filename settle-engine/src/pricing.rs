//! Discount resolution and table-level totals.
//!
//! The effective per-unit price is the single source of truth for what
//! a selected quantity costs; everything here recomputes from the line
//! slice passed in — the engine caches no order state.

use rust_decimal::prelude::*;
use shared::order::{DiscountSpec, OrderLine};

use crate::money::{round_amount, to_decimal};

/// Effective per-unit price after discount.
///
/// A fixed discount exceeding the unit price is rejected at line
/// creation; the clamp here is defensive only.
pub fn effective_unit_price(line: &OrderLine) -> Decimal {
    let unit = to_decimal(line.unit_price);
    let effective = match line.discount {
        Some(DiscountSpec::Percentage(p)) => {
            unit * (Decimal::ONE_HUNDRED - to_decimal(p)) / Decimal::ONE_HUNDRED
        }
        Some(DiscountSpec::FixedAmount(a)) => unit - to_decimal(a),
        None => unit,
    };
    round_amount(effective.max(Decimal::ZERO))
}

/// Discount value carried by a line across its whole quantity,
/// regardless of paid status.
pub fn line_discount_amount(line: &OrderLine) -> Decimal {
    let unit = to_decimal(line.unit_price);
    let qty = to_decimal(line.quantity);
    let amount = match line.discount {
        Some(DiscountSpec::Percentage(p)) => to_decimal(p) * qty * unit / Decimal::ONE_HUNDRED,
        Some(DiscountSpec::FixedAmount(a)) => to_decimal(a) * qty,
        None => Decimal::ZERO,
    };
    round_amount(amount)
}

/// Amount payable for one share of a divided line.
///
/// For divided lines the resolver is queried per share, not per whole
/// line: each share settles `quantity / division` at the effective
/// unit price.
pub fn share_amount(line: &OrderLine) -> Decimal {
    round_amount(effective_unit_price(line) * to_decimal(line.share_quantity()))
}

/// Line total at the effective price.
pub fn line_total(line: &OrderLine) -> Decimal {
    round_amount(effective_unit_price(line) * to_decimal(line.quantity))
}

/// Undiscounted total of all order lines on the table.
pub fn total_order_amount(lines: &[OrderLine]) -> Decimal {
    let total: Decimal = lines
        .iter()
        .map(|l| to_decimal(l.unit_price) * to_decimal(l.quantity))
        .sum();
    round_amount(total)
}

/// Total discount value across all discounted lines.
pub fn total_discount_amount(lines: &[OrderLine]) -> Decimal {
    round_amount(lines.iter().map(line_discount_amount).sum())
}

/// Remaining payable balance on the table:
/// gross total − discounts − already collected, clamped to zero.
pub fn remaining_amount(lines: &[OrderLine], collected: f64) -> Decimal {
    let remaining =
        total_order_amount(lines) - total_discount_amount(lines) - to_decimal(collected);
    round_amount(remaining.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(unit_price: f64, quantity: f64, discount: Option<DiscountSpec>) -> OrderLine {
        OrderLine::new("line-1", "table-1", "Item", unit_price, quantity, discount, None).unwrap()
    }

    #[test]
    fn test_percentage_discount() {
        let l = line(100.0, 1.0, Some(DiscountSpec::Percentage(20.0)));
        assert_eq!(effective_unit_price(&l), dec!(80));
    }

    #[test]
    fn test_fixed_discount() {
        let l = line(100.0, 1.0, Some(DiscountSpec::FixedAmount(15.0)));
        assert_eq!(effective_unit_price(&l), dec!(85));
    }

    #[test]
    fn test_no_discount() {
        let l = line(33.33, 3.0, None);
        assert_eq!(effective_unit_price(&l), dec!(33.33));
        assert_eq!(line_total(&l), dec!(99.99));
    }

    #[test]
    fn test_oversized_fixed_discount_clamped_defensively() {
        // Rejected at line creation; the resolver still never goes negative
        let mut l = line(10.0, 1.0, None);
        l.discount = Some(DiscountSpec::FixedAmount(15.0));
        assert_eq!(effective_unit_price(&l), Decimal::ZERO);
    }

    #[test]
    fn test_line_discount_amount() {
        let percent = line(100.0, 3.0, Some(DiscountSpec::Percentage(20.0)));
        assert_eq!(line_discount_amount(&percent), dec!(60));

        let fixed = line(100.0, 3.0, Some(DiscountSpec::FixedAmount(15.0)));
        assert_eq!(line_discount_amount(&fixed), dec!(45));

        let none = line(100.0, 3.0, None);
        assert_eq!(line_discount_amount(&none), Decimal::ZERO);
    }

    #[test]
    fn test_share_amount_for_divided_line() {
        let l = OrderLine::new("l", "t", "Platter", 60.0, 1.0, None, Some(4)).unwrap();
        // One share settles a quarter of the line
        assert_eq!(share_amount(&l), dec!(15));
    }

    #[test]
    fn test_table_totals() {
        let lines = vec![
            line(50.0, 3.0, None),
            line(100.0, 2.0, Some(DiscountSpec::Percentage(10.0))),
        ];
        assert_eq!(total_order_amount(&lines), dec!(350));
        assert_eq!(total_discount_amount(&lines), dec!(20));
        assert_eq!(remaining_amount(&lines, 0.0), dec!(330));
        assert_eq!(remaining_amount(&lines, 130.0), dec!(200));
    }

    #[test]
    fn test_remaining_clamped_to_zero() {
        let lines = vec![line(10.0, 1.0, None)];
        assert_eq!(remaining_amount(&lines, 15.0), Decimal::ZERO);
    }
}
