// Action ledger - append-only arena of submitted actions

use crate::error::MultiSigError;
use crate::identity::Address;
use crate::ledger::action::{Action, ActionId};
use serde::{Deserialize, Serialize};

/// Stores every submitted action, indexed by its position
///
/// Actions are never removed, so an index handed out once is never reused.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLedger {
    actions: Vec<Action>,
}

impl ActionLedger {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append a new action and return its index
    ///
    /// Authorization is the caller's job; the ledger only records.
    pub fn append(&mut self, recipient: Address, value: u64, payload: Vec<u8>) -> ActionId {
        let id = self.actions.len() as ActionId;
        self.actions.push(Action::new(recipient, value, payload));
        id
    }

    /// Look up an action
    pub fn get(&self, id: ActionId) -> Result<&Action, MultiSigError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.actions.get(i))
            .ok_or(MultiSigError::ActionNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: ActionId) -> Result<&mut Action, MultiSigError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.actions.get_mut(i))
            .ok_or(MultiSigError::ActionNotFound(id))
    }

    /// Number of actions ever submitted
    pub fn count(&self) -> u64 {
        self.actions.len() as u64
    }

    /// Iterate over `(index, action)` pairs in submission order
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(i, action)| (i as ActionId, action))
    }

    /// Indices of actions that have not executed yet
    pub fn pending(&self) -> Vec<ActionId> {
        self.iter()
            .filter(|(_, action)| !action.is_executed())
            .map(|(id, _)| id)
            .collect()
    }
}
