// Action - a proposed transfer awaiting or having received quorum

use crate::identity::Address;
use serde::{Deserialize, Serialize};

/// Sequential, never-reused index of an action
pub type ActionId = u64;

/// A value transfer plus opaque payload to a recipient
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    recipient: Address,
    value: u64,
    payload: Vec<u8>,
    executed: bool,
    confirmations: usize,
}

impl Action {
    pub(crate) fn new(recipient: Address, value: u64, payload: Vec<u8>) -> Self {
        Self {
            recipient,
            value,
            payload,
            executed: false,
            confirmations: 0,
        }
    }

    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Has this action reached its terminal state?
    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Live number of owner confirmations
    pub fn confirmations(&self) -> usize {
        self.confirmations
    }

    pub(crate) fn increment_confirmations(&mut self) {
        self.confirmations += 1;
    }

    pub(crate) fn decrement_confirmations(&mut self) {
        debug_assert!(self.confirmations > 0, "revoke on an unconfirmed action");
        self.confirmations -= 1;
    }

    pub(crate) fn mark_executed(&mut self) {
        self.executed = true;
    }
}
