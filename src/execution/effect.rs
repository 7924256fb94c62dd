// Effects - the outside world an executed action pays into
// Implementations decide how value and payload actually leave the wallet

use crate::identity::Address;
use crate::ledger::{Action, ActionId};
use crate::wallet::MultiSigWallet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why an effect could not be carried out
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EffectError {
    #[error("Recipient rejected transfer: {0}")]
    Rejected(String),

    #[error("Transport failure: {0}")]
    Transport(String),
}

/// The call an executed action makes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    action: ActionId,
    recipient: Address,
    value: u64,
    payload: Vec<u8>,
}

impl Transfer {
    pub(crate) fn from_action(id: ActionId, action: &Action) -> Self {
        Self {
            action: id,
            recipient: *action.recipient(),
            value: action.value(),
            payload: action.payload().to_vec(),
        }
    }

    pub fn action(&self) -> ActionId {
        self.action
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
}

// ============================================================================
// EFFECT TRAIT
// ============================================================================

/// Performs the external side of an execution
///
/// Called after the action is marked executed and the treasury debited. The
/// wallet is handed back so the recipient may call into it again; whatever
/// happens through that handle is discarded if `perform` returns an error.
pub trait Effect {
    fn perform(&mut self, wallet: &mut MultiSigWallet, transfer: &Transfer) -> Result<(), EffectError>;
}

impl<F> Effect for F
where
    F: FnMut(&mut MultiSigWallet, &Transfer) -> Result<(), EffectError>,
{
    fn perform(&mut self, wallet: &mut MultiSigWallet, transfer: &Transfer) -> Result<(), EffectError> {
        self(wallet, transfer)
    }
}

// ============================================================================
// MOCK EFFECT
// ============================================================================

/// Configurable effect for tests
pub struct MockEffect {
    should_succeed: bool,
    failure_message: Option<String>,
    failures_before_success: usize,
    calls: Vec<Transfer>,
}

impl MockEffect {
    /// Create a new mock effect (defaults to failure)
    pub fn new() -> Self {
        Self {
            should_succeed: false,
            failure_message: None,
            failures_before_success: 0,
            calls: Vec::new(),
        }
    }

    /// Configure to always succeed
    pub fn with_success(mut self) -> Self {
        self.should_succeed = true;
        self
    }

    /// Configure to always fail with a message
    pub fn with_failure(mut self, message: &str) -> Self {
        self.should_succeed = false;
        self.failure_message = Some(message.to_string());
        self
    }

    /// Fail N times, then succeed
    pub fn with_failures_then_success(mut self, failures: usize) -> Self {
        self.should_succeed = true;
        self.failures_before_success = failures;
        self
    }

    /// Every transfer this effect was asked to perform, failed ones included
    pub fn calls(&self) -> &[Transfer] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    fn failure(&self) -> EffectError {
        EffectError::Rejected(
            self.failure_message
                .clone()
                .unwrap_or_else(|| "Mock failure".to_string()),
        )
    }
}

impl Default for MockEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for MockEffect {
    fn perform(&mut self, _wallet: &mut MultiSigWallet, transfer: &Transfer) -> Result<(), EffectError> {
        let call_num = self.calls.len();
        self.calls.push(transfer.clone());

        if call_num < self.failures_before_success {
            return Err(self.failure());
        }

        if self.should_succeed {
            Ok(())
        } else {
            Err(self.failure())
        }
    }
}

// ============================================================================
// PAYOUT BOOK
// ============================================================================

/// Record of one completed payout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutReceipt {
    transfer: Transfer,
    paid_at: DateTime<Utc>,
}

impl PayoutReceipt {
    pub fn transfer(&self) -> &Transfer {
        &self.transfer
    }

    pub fn paid_at(&self) -> DateTime<Utc> {
        self.paid_at
    }
}

/// Off-wallet account book crediting recipients of executed actions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBook {
    credits: BTreeMap<Address, u64>,
    receipts: Vec<PayoutReceipt>,
}

impl PayoutBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total value credited to `recipient`
    pub fn credited(&self, recipient: &Address) -> u64 {
        self.credits.get(recipient).copied().unwrap_or(0)
    }

    /// All receipts, oldest first
    pub fn receipts(&self) -> &[PayoutReceipt] {
        &self.receipts
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

impl Effect for PayoutBook {
    fn perform(&mut self, _wallet: &mut MultiSigWallet, transfer: &Transfer) -> Result<(), EffectError> {
        let credited = self
            .credited(transfer.recipient())
            .checked_add(transfer.value())
            .ok_or_else(|| EffectError::Rejected("recipient balance would overflow".to_string()))?;

        self.credits.insert(*transfer.recipient(), credited);
        self.receipts.push(PayoutReceipt {
            transfer: transfer.clone(),
            paid_at: Utc::now(),
        });
        Ok(())
    }
}
