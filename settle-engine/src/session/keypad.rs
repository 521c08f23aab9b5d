//! Keypad state machine: digit entry and equal-split ("1/n") modes.
//!
//! Free typing and click-selection are mutually exclusive within one
//! payment attempt: a typing keystroke supersedes any prior selection,
//! while selection gestures overwrite the typed amount.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::order::{OrderLine, QTY_EPSILON};

use super::PaymentSession;
use crate::money::format_decimal;
use crate::pricing;

/// Keypad input mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeypadMode {
    /// Keystrokes build the entered amount string
    #[default]
    DigitEntry,
    /// "1/n" was pressed; the next digit is the split divisor
    EqualSplit,
}

/// A single cashier keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Dot,
    Backspace,
    Clear,
    /// Pay everything remaining on the table
    All,
    /// Enter equal-split mode
    EqualSplit,
    /// Open discount selection (handled by an external collaborator)
    Discount,
    Cancel,
}

/// What the surrounding session should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadSignal {
    None,
    OpenDiscountPicker,
}

impl PaymentSession {
    /// Feed one keystroke into the session.
    ///
    /// `lines` is the table's current order lines and `collected` the
    /// amount already collected against the table; both come from the
    /// order collaborator on every call, so totals are always
    /// recomputed from current truth.
    pub fn press(&mut self, key: Key, lines: &[OrderLine], collected: f64) -> KeypadSignal {
        match self.mode() {
            KeypadMode::EqualSplit => self.press_equal_split(key, lines, collected),
            KeypadMode::DigitEntry => self.press_digit_entry(key, lines, collected),
        }
    }

    fn press_digit_entry(&mut self, key: Key, lines: &[OrderLine], collected: f64) -> KeypadSignal {
        match key {
            Key::Digit(d) if d <= 9 => {
                self.supersede_selection();
                let mut amount = self.entered_amount().to_string();
                amount.push(char::from(b'0' + d));
                self.selection_mut().set_entered_amount(amount);
            }
            Key::Digit(d) => {
                tracing::debug!(digit = d, "non-decimal digit ignored");
            }
            Key::Dot => {
                self.supersede_selection();
                if !self.entered_amount().contains('.') {
                    let mut amount = self.entered_amount().to_string();
                    amount.push('.');
                    self.selection_mut().set_entered_amount(amount);
                }
            }
            Key::Backspace => {
                // Editing the string detaches it from any selection
                self.selection_mut().clear_entries();
                let mut amount = self.entered_amount().to_string();
                amount.pop();
                self.selection_mut().set_entered_amount(amount);
            }
            Key::Clear => {
                self.selection_mut().clear();
            }
            Key::All => {
                let remaining = pricing::remaining_amount(lines, collected);
                for line in lines {
                    if line.unpaid_quantity() > QTY_EPSILON {
                        self.selection_mut().set_all(lines, &line.line_id);
                    }
                }
                self.selection_mut()
                    .set_entered_amount(format_decimal(remaining));
            }
            Key::EqualSplit => {
                self.set_mode(KeypadMode::EqualSplit);
            }
            Key::Discount => {
                // Amount stays; the selection is superseded by whatever
                // the discount collaborator applies
                self.selection_mut().clear_entries();
                return KeypadSignal::OpenDiscountPicker;
            }
            Key::Cancel => {
                self.reset();
            }
        }
        KeypadSignal::None
    }

    fn press_equal_split(&mut self, key: Key, lines: &[OrderLine], collected: f64) -> KeypadSignal {
        match key {
            Key::Digit(n @ 1..=9) => {
                let remaining = pricing::remaining_amount(lines, collected);
                let raw = remaining / Decimal::from(n);
                let mut result =
                    raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                // A residual under one currency unit is unpayable as a
                // further split; the last share absorbs the rounding
                if remaining - result < Decimal::ONE {
                    result = remaining;
                }
                self.selection_mut().clear_entries();
                self.selection_mut()
                    .set_entered_amount(format_decimal(result));
                self.set_mode(KeypadMode::DigitEntry);
            }
            Key::Cancel => {
                // Abort back to digit entry, amount untouched
                self.set_mode(KeypadMode::DigitEntry);
            }
            other => {
                tracing::debug!(key = ?other, "awaiting split divisor, key ignored");
            }
        }
        KeypadSignal::None
    }

    /// Free typing supersedes a prior click-selection.
    fn supersede_selection(&mut self) {
        if !self.selection().is_empty() {
            self.selection_mut().clear();
        }
    }
}
