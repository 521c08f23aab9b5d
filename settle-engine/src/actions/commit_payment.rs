//! Settlement committer
//!
//! Validates the session's selection against outstanding quantities and
//! commits it as a collection record, updating paid quantities. The
//! commit is all-or-nothing: nothing is mutated until every involved
//! line has been checked.

use shared::order::{
    CollectionKind, CollectionRecord, LineAllocation, OrderLine, PaymentMethod, QTY_EPSILON,
};

use crate::error::SettleError;
use crate::money::{self, amounts_equal, to_f64};
use crate::session::PaymentSession;

/// Commit the session's pending payment against the table's lines.
///
/// With a non-empty selection the entered amount must match the
/// selection total and each line's `paid_quantity` is advanced by its
/// selected quantity. With an empty selection the amount is recorded
/// against the table without per-line allocation; downstream
/// reconciliation treats such records as amount-only.
///
/// The session is cleared after a successful commit.
pub fn commit_payment(
    lines: &mut [OrderLine],
    session: &mut PaymentSession,
    method: PaymentMethod,
    created_by: &str,
) -> Result<CollectionRecord, SettleError> {
    let amount = money::parse_entered_amount(session.entered_amount())?;

    let allocations = if session.selection().is_empty() {
        None
    } else {
        let selected = session.selection().total_selected_amount(lines);
        if !amounts_equal(selected, amount) {
            return Err(SettleError::AmountMismatch {
                entered: to_f64(amount),
                selected: to_f64(selected),
            });
        }

        // Validate every entry before touching any line
        let mut planned = Vec::with_capacity(session.selection().entries().len());
        for entry in session.selection().entries() {
            let idx = lines
                .iter()
                .position(|l| l.line_id == entry.line_id)
                .ok_or_else(|| SettleError::LineNotFound(entry.line_id.clone()))?;
            if lines[idx].paid_quantity + entry.quantity > lines[idx].quantity + QTY_EPSILON {
                return Err(SettleError::InsufficientQuantity(entry.line_id.clone()));
            }
            planned.push((idx, entry.quantity));
        }

        let mut allocations = Vec::with_capacity(planned.len());
        for (idx, quantity) in planned {
            let line = &mut lines[idx];
            line.paid_quantity = (line.paid_quantity + quantity).min(line.quantity);
            allocations.push(LineAllocation {
                line_id: line.line_id.clone(),
                quantity,
            });
        }
        Some(allocations)
    };

    let record = CollectionRecord {
        collection_id: uuid::Uuid::new_v4().to_string(),
        table_id: session.table_id().to_string(),
        method,
        amount: to_f64(amount),
        kind: CollectionKind::Payment,
        allocations,
        created_by: created_by.to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    };

    tracing::info!(
        table_id = %record.table_id,
        collection_id = %record.collection_id,
        amount = record.amount,
        amount_only = record.is_amount_only(),
        "payment committed"
    );

    session.reset();
    Ok(record)
}
