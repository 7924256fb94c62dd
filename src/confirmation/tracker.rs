// Confirmation tracker - which owner approved which action

use crate::error::MultiSigError;
use crate::identity::Address;
use crate::ledger::{ActionId, ActionLedger};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The `(action, owner) -> confirmed` relation
///
/// An owner absent from an action's set has not confirmed it. The count
/// stored on each `Action` is kept equal to the size of its set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationTracker {
    records: BTreeMap<ActionId, BTreeSet<Address>>,
}

impl ConfirmationTracker {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Has `owner` confirmed action `id`?
    pub fn is_confirmed(&self, id: ActionId, owner: &Address) -> bool {
        self.records
            .get(&id)
            .map(|owners| owners.contains(owner))
            .unwrap_or(false)
    }

    /// Owners that currently confirm action `id`, in address order
    pub fn confirmations(&self, id: ActionId) -> Vec<Address> {
        self.records
            .get(&id)
            .map(|owners| owners.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of true records for action `id`
    pub fn count(&self, id: ActionId) -> usize {
        self.records.get(&id).map(BTreeSet::len).unwrap_or(0)
    }

    /// Iterate over `(action, confirming owners)` for actions with any records
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ActionId, &BTreeSet<Address>)> {
        self.records.iter().map(|(id, owners)| (*id, owners))
    }

    /// Record `owner`'s confirmation and bump the action's count
    ///
    /// Returns the new confirmation count. Executed actions are frozen, so
    /// confirming one fails with `AlreadyExecuted`.
    pub fn confirm(
        &mut self,
        ledger: &mut ActionLedger,
        id: ActionId,
        owner: Address,
    ) -> Result<usize, MultiSigError> {
        let action = ledger.get_mut(id)?;
        if action.is_executed() {
            return Err(MultiSigError::AlreadyExecuted(id));
        }
        if self.is_confirmed(id, &owner) {
            return Err(MultiSigError::AlreadyConfirmed { action: id, owner });
        }

        self.records.entry(id).or_default().insert(owner);
        action.increment_confirmations();
        Ok(action.confirmations())
    }

    /// Withdraw `owner`'s confirmation and decrement the action's count
    ///
    /// Returns the new confirmation count.
    pub fn revoke(
        &mut self,
        ledger: &mut ActionLedger,
        id: ActionId,
        owner: Address,
    ) -> Result<usize, MultiSigError> {
        let action = ledger.get_mut(id)?;
        if !self.is_confirmed(id, &owner) {
            return Err(MultiSigError::NotConfirmed { action: id, owner });
        }
        if action.is_executed() {
            return Err(MultiSigError::AlreadyExecuted(id));
        }

        if let Some(owners) = self.records.get_mut(&id) {
            owners.remove(&owner);
            if owners.is_empty() {
                self.records.remove(&id);
            }
        }
        action.decrement_confirmations();
        Ok(action.confirmations())
    }
}
