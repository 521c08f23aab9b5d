//! Order line and discount types.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Tolerance for quantity comparisons (quantities may be fractional
/// after a line has been divided into shares).
pub const QTY_EPSILON: f64 = 1e-6;

/// Per-unit discount applied to an order line.
///
/// Percentage and fixed-amount discounts are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountSpec {
    /// Percentage off the unit price (0-100)
    Percentage(f64),
    /// Fixed amount off each unit
    FixedAmount(f64),
}

impl DiscountSpec {
    /// Validate this discount against the unit price it will apply to.
    ///
    /// A fixed discount larger than the unit price is an invalid-discount
    /// condition; the ordering subsystem must reject the line upstream.
    pub fn validate_for(&self, unit_price: f64) -> Result<(), DomainError> {
        match *self {
            DiscountSpec::Percentage(p) => {
                if !p.is_finite() {
                    return Err(DomainError::NonFinite {
                        field: "percentage",
                    });
                }
                if !(0.0..=100.0).contains(&p) {
                    return Err(DomainError::PercentageOutOfRange(p));
                }
            }
            DiscountSpec::FixedAmount(a) => {
                if !a.is_finite() {
                    return Err(DomainError::NonFinite {
                        field: "fixed amount",
                    });
                }
                if a < 0.0 || a > unit_price {
                    return Err(DomainError::DiscountExceedsPrice {
                        amount: a,
                        unit_price,
                    });
                }
            }
        }
        Ok(())
    }
}

/// One unit-priced item instance belonging to a table session.
///
/// Created by the ordering subsystem; the engine only ever moves
/// `paid_quantity` (up on commit, down on refund) and never deletes a
/// line. Invariant: `0 <= paid_quantity <= quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub line_id: String,
    pub table_id: String,
    pub name: String,
    pub unit_price: f64,
    /// Total quantity; fractional when the line has been divided
    pub quantity: f64,
    /// Settled quantity
    #[serde(default)]
    pub paid_quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountSpec>,
    /// Number of equal, independently payable shares the quantity was
    /// split into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<u32>,
}

impl OrderLine {
    /// Construct a validated order line with nothing paid yet.
    pub fn new(
        line_id: impl Into<String>,
        table_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: f64,
        quantity: f64,
        discount: Option<DiscountSpec>,
        division: Option<u32>,
    ) -> Result<Self, DomainError> {
        if !unit_price.is_finite() {
            return Err(DomainError::NonFinite {
                field: "unit price",
            });
        }
        if unit_price < 0.0 {
            return Err(DomainError::NegativePrice(unit_price));
        }
        if !quantity.is_finite() {
            return Err(DomainError::NonFinite { field: "quantity" });
        }
        if quantity <= 0.0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        if let Some(d) = &discount {
            d.validate_for(unit_price)?;
        }
        if division == Some(0) {
            return Err(DomainError::InvalidDivision);
        }
        Ok(Self {
            line_id: line_id.into(),
            table_id: table_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            paid_quantity: 0.0,
            discount,
            division,
        })
    }

    /// Quantity still outstanding on this line.
    pub fn unpaid_quantity(&self) -> f64 {
        (self.quantity - self.paid_quantity).max(0.0)
    }

    /// A fully settled line is excluded from unpaid views.
    pub fn is_settled(&self) -> bool {
        self.unpaid_quantity() < QTY_EPSILON
    }

    /// Payable quantity of a single share.
    ///
    /// One whole unit for undivided lines; `quantity / division` when the
    /// line was split for independent settlement.
    pub fn share_quantity(&self) -> f64 {
        match self.division {
            Some(d) if d > 0 => self.quantity / f64::from(d),
            _ => 1.0,
        }
    }
}
