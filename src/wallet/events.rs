// Wallet events - notifications emitted by successful operations

use crate::identity::Address;
use crate::ledger::ActionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry in the wallet's event log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEvent {
    Submitted {
        by: Address,
        recipient: Address,
        action: ActionId,
        value: u64,
        payload: Vec<u8>,
    },
    Confirmed {
        by: Address,
        action: ActionId,
    },
    Revoked {
        by: Address,
        action: ActionId,
    },
    Executed {
        by: Address,
        recipient: Address,
        action: ActionId,
        value: u64,
        payload: Vec<u8>,
    },
    Deposited {
        by: Address,
        amount: u64,
    },
}

impl WalletEvent {
    /// The party whose call produced this event
    pub fn actor(&self) -> &Address {
        match self {
            WalletEvent::Submitted { by, .. }
            | WalletEvent::Confirmed { by, .. }
            | WalletEvent::Revoked { by, .. }
            | WalletEvent::Executed { by, .. }
            | WalletEvent::Deposited { by, .. } => by,
        }
    }

    /// The action this event concerns, if any
    pub fn action(&self) -> Option<ActionId> {
        match self {
            WalletEvent::Submitted { action, .. }
            | WalletEvent::Confirmed { action, .. }
            | WalletEvent::Revoked { action, .. }
            | WalletEvent::Executed { action, .. } => Some(*action),
            WalletEvent::Deposited { .. } => None,
        }
    }
}

impl fmt::Display for WalletEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletEvent::Submitted {
                by,
                recipient,
                action,
                value,
                payload,
            } => write!(
                f,
                "Submitted(by={by}, to={recipient}, action={action}, value={value}, payload=0x{})",
                hex::encode(payload)
            ),
            WalletEvent::Confirmed { by, action } => {
                write!(f, "Confirmed(by={by}, action={action})")
            }
            WalletEvent::Revoked { by, action } => write!(f, "Revoked(by={by}, action={action})"),
            WalletEvent::Executed {
                by,
                recipient,
                action,
                value,
                payload,
            } => write!(
                f,
                "Executed(by={by}, to={recipient}, action={action}, value={value}, payload=0x{})",
                hex::encode(payload)
            ),
            WalletEvent::Deposited { by, amount } => {
                write!(f, "Deposited(by={by}, amount={amount})")
            }
        }
    }
}
