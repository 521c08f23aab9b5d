//! Refund calculator
//!
//! A return reduces the settled amount, not the order: `paid_quantity`
//! goes down, `quantity` stays. The refund is emitted as a
//! negative-amount collection record so daily totals net out.

use shared::order::{
    CollectionKind, CollectionRecord, LineAllocation, OrderLine, PaymentMethod, QTY_EPSILON,
};

use crate::error::SettleError;
use crate::money::{require_finite, round_amount, to_decimal, to_f64};
use crate::pricing;

/// Refund `return_quantity` units of a line that were previously paid.
///
/// Rejects (never clamps) quantities that are non-positive or exceed
/// the line's paid quantity: a repeated refund past what remains
/// settled is an invalid-quantity condition, not a no-op.
pub fn refund_line(
    line: &mut OrderLine,
    return_quantity: f64,
    method: PaymentMethod,
    created_by: &str,
) -> Result<CollectionRecord, SettleError> {
    require_finite(return_quantity, "return quantity")?;
    if return_quantity <= QTY_EPSILON || return_quantity > line.paid_quantity + QTY_EPSILON {
        return Err(SettleError::InvalidRefundQuantity {
            requested: return_quantity,
            paid: line.paid_quantity,
        });
    }

    let amount = round_amount(pricing::effective_unit_price(line) * to_decimal(return_quantity));
    line.paid_quantity = (line.paid_quantity - return_quantity).max(0.0);

    let record = CollectionRecord {
        collection_id: uuid::Uuid::new_v4().to_string(),
        table_id: line.table_id.clone(),
        method,
        amount: -to_f64(amount),
        kind: CollectionKind::Refund,
        allocations: Some(vec![LineAllocation {
            line_id: line.line_id.clone(),
            quantity: return_quantity,
        }]),
        created_by: created_by.to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    };

    tracing::info!(
        table_id = %record.table_id,
        line_id = %line.line_id,
        quantity = return_quantity,
        amount = record.amount,
        "refund recorded"
    );

    Ok(record)
}
