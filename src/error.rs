// Error taxonomy for wallet operations

use crate::execution::EffectError;
use crate::identity::Address;
use crate::ledger::ActionId;
use thiserror::Error;

/// Errors raised by the multi-owner wallet
///
/// Every variant is returned before any state is written, or after all writes
/// of the failing call have been rolled back.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MultiSigError {
    // === Construction ===
    #[error("Owner set cannot be empty")]
    InvalidOwnerSet,

    #[error("Duplicate owner: {0}")]
    DuplicateOwner(Address),

    #[error("Invalid owner identity: {0}")]
    InvalidOwnerIdentity(Address),

    #[error("Invalid threshold {threshold} for {owners} owners")]
    InvalidThreshold { threshold: usize, owners: usize },

    // === Authorization ===
    #[error("Caller {0} is not an owner")]
    Unauthorized(Address),

    // === Actions ===
    #[error("Action {0} does not exist")]
    ActionNotFound(ActionId),

    #[error("Action {action} is already confirmed by {owner}")]
    AlreadyConfirmed { action: ActionId, owner: Address },

    #[error("Action {action} is not confirmed by {owner}")]
    NotConfirmed { action: ActionId, owner: Address },

    #[error("Action {0} has already been executed")]
    AlreadyExecuted(ActionId),

    #[error("Action {action} has {confirmations} confirmations, {required} required")]
    InsufficientConfirmations {
        action: ActionId,
        confirmations: usize,
        required: usize,
    },

    // === Treasury ===
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("Balance would overflow")]
    BalanceOverflow,

    // === Execution ===
    #[error("Effect failed: {0}")]
    EffectFailed(#[from] EffectError),

    // === Restored state ===
    #[error("Inconsistent wallet state: {0}")]
    InconsistentState(String),
}
