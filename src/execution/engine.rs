// Execution engine - quorum gate and state commit for executing an action

use crate::error::MultiSigError;
use crate::execution::effect::Transfer;
use crate::identity::Address;
use crate::ledger::{ActionId, ActionLedger};
use crate::registry::OwnerRegistry;
use crate::treasury::Treasury;

/// Checks and state writes that precede an action's effect
///
/// Stateless: it borrows the wallet's components for the duration of one call.
pub struct ExecutionEngine<'a> {
    registry: &'a OwnerRegistry,
    ledger: &'a mut ActionLedger,
    treasury: &'a mut Treasury,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(
        registry: &'a OwnerRegistry,
        ledger: &'a mut ActionLedger,
        treasury: &'a mut Treasury,
    ) -> Self {
        Self {
            registry,
            ledger,
            treasury,
        }
    }

    /// Run every precondition for executing `id` without writing anything
    pub fn check(&self, caller: &Address, id: ActionId) -> Result<Transfer, MultiSigError> {
        self.registry.ensure_owner(caller)?;

        let action = self.ledger.get(id)?;
        if action.is_executed() {
            return Err(MultiSigError::AlreadyExecuted(id));
        }

        let required = self.registry.threshold();
        if action.confirmations() < required {
            return Err(MultiSigError::InsufficientConfirmations {
                action: id,
                confirmations: action.confirmations(),
                required,
            });
        }

        if !self.treasury.can_afford(action.value()) {
            return Err(MultiSigError::InsufficientBalance {
                available: self.treasury.balance(),
                required: action.value(),
            });
        }

        Ok(Transfer::from_action(id, action))
    }

    /// Check, then debit the treasury and mark the action executed
    ///
    /// After this returns the action is terminal; the effect runs afterwards,
    /// so a reentrant execute of the same action fails with `AlreadyExecuted`.
    pub fn commit(self, caller: &Address, id: ActionId) -> Result<Transfer, MultiSigError> {
        let transfer = self.check(caller, id)?;

        self.treasury.debit(transfer.value())?;
        self.ledger.get_mut(id)?.mark_executed();

        Ok(transfer)
    }
}
