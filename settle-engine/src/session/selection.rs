//! The cashier's in-progress selection of order-line quantities.
//!
//! A selection is tentative: nothing is committed until the settlement
//! committer validates it. Every mutation that changes a selected
//! quantity re-syncs the entered amount so the displayed amount and the
//! selection never silently diverge.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{OrderLine, QTY_EPSILON};

use crate::money::{format_decimal, round_amount, to_decimal};
use crate::pricing;

/// One tentative `(order line, quantity)` allocation toward the
/// pending payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionEntry {
    pub line_id: String,
    pub quantity: f64,
}

/// The selection set plus the free-form amount string under the keypad.
///
/// Owned by the active payment session; reset on commit, cancel or
/// table switch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
    entered_amount: String,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn entered_amount(&self) -> &str {
        &self.entered_amount
    }

    /// Overwrite the amount string directly (keypad typing path).
    pub(crate) fn set_entered_amount(&mut self, raw: String) {
        self.entered_amount = raw;
    }

    /// Currently selected quantity for a line, zero if absent.
    pub fn selected_quantity(&self, line_id: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.line_id == line_id)
            .map(|e| e.quantity)
            .unwrap_or(0.0)
    }

    /// Adjust the selected quantity for a line by `delta` (one unit or
    /// one division share per UI click).
    ///
    /// Creates the entry when absent, drops it when the result reaches
    /// zero. A delta that would exceed the line's outstanding quantity
    /// is ignored: repeated idempotent clicks must not interrupt the
    /// cashier flow.
    pub fn toggle(&mut self, lines: &[OrderLine], line_id: &str, delta: f64) {
        let Some(line) = lines.iter().find(|l| l.line_id == line_id) else {
            tracing::debug!(line_id, "toggle on unknown line ignored");
            return;
        };
        let next = self.selected_quantity(line_id) + delta;
        if next <= QTY_EPSILON {
            self.drop_entry(line_id);
        } else if line.paid_quantity + next > line.quantity + QTY_EPSILON {
            tracing::debug!(
                line_id,
                requested = next,
                unpaid = line.unpaid_quantity(),
                "selection beyond outstanding quantity ignored"
            );
            return;
        } else {
            self.upsert(line_id, next);
        }
        self.sync_entered_amount(lines);
    }

    /// Select everything still outstanding on a line.
    pub fn set_all(&mut self, lines: &[OrderLine], line_id: &str) {
        let Some(line) = lines.iter().find(|l| l.line_id == line_id) else {
            tracing::debug!(line_id, "set_all on unknown line ignored");
            return;
        };
        let unpaid = line.unpaid_quantity();
        if unpaid > QTY_EPSILON {
            self.upsert(line_id, unpaid);
        } else {
            self.drop_entry(line_id);
        }
        self.sync_entered_amount(lines);
    }

    /// Drop a line's entry unconditionally.
    pub fn remove(&mut self, lines: &[OrderLine], line_id: &str) {
        self.drop_entry(line_id);
        self.sync_entered_amount(lines);
    }

    /// Empty the set and reset the entered amount.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entered_amount.clear();
    }

    /// Drop all entries but keep the amount string as-is (discount
    /// shortcut and equal-split completion).
    pub(crate) fn clear_entries(&mut self) {
        self.entries.clear();
    }

    /// Total of the selection at effective per-unit prices, rounded.
    pub fn total_selected_amount(&self, lines: &[OrderLine]) -> Decimal {
        let mut total = Decimal::ZERO;
        for entry in &self.entries {
            if let Some(line) = lines.iter().find(|l| l.line_id == entry.line_id) {
                total += pricing::effective_unit_price(line) * to_decimal(entry.quantity);
            }
        }
        round_amount(total)
    }

    fn upsert(&mut self, line_id: &str, quantity: f64) {
        match self.entries.iter_mut().find(|e| e.line_id == line_id) {
            Some(entry) => entry.quantity = quantity,
            None => self.entries.push(SelectionEntry {
                line_id: line_id.to_string(),
                quantity,
            }),
        }
    }

    fn drop_entry(&mut self, line_id: &str) {
        self.entries.retain(|e| e.line_id != line_id);
    }

    fn sync_entered_amount(&mut self, lines: &[OrderLine]) {
        if self.entries.is_empty() {
            self.entered_amount.clear();
        } else {
            self.entered_amount = format_decimal(self.total_selected_amount(lines));
        }
    }
}
