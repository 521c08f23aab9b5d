//! Payment session: one cashier's in-progress settlement on one table.
//!
//! The session is an explicit object passed into every engine
//! operation — there is no ambient shared state. Reset boundaries are
//! commit, cancel and table switch.

pub mod keypad;
pub mod selection;

pub use keypad::{Key, KeypadMode, KeypadSignal};
pub use selection::{SelectionEntry, SelectionSet};

use serde::{Deserialize, Serialize};

/// Selection set, entered amount and keypad mode for the active table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSession {
    table_id: String,
    selection: SelectionSet,
    mode: KeypadMode,
}

impl PaymentSession {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            selection: SelectionSet::new(),
            mode: KeypadMode::DigitEntry,
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Mutable access for click-selection gestures (toggle, set_all,
    /// remove). Typing goes through [`PaymentSession::press`].
    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn mode(&self) -> KeypadMode {
        self.mode
    }

    pub fn entered_amount(&self) -> &str {
        self.selection.entered_amount()
    }

    /// Abandon the in-progress payment attempt.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.mode = KeypadMode::DigitEntry;
    }

    /// Moving to another table abandons any in-progress selection.
    pub fn switch_table(&mut self, table_id: impl Into<String>) {
        self.table_id = table_id.into();
        self.reset();
    }

    pub(crate) fn set_mode(&mut self, mode: KeypadMode) {
        self.mode = mode;
    }
}
