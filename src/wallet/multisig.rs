// MultiSigWallet - the public face of the quorum state machine

use crate::config::WalletConfig;
use crate::confirmation::ConfirmationTracker;
use crate::error::MultiSigError;
use crate::execution::{Effect, ExecutionEngine};
use crate::identity::Address;
use crate::ledger::{Action, ActionId, ActionLedger};
use crate::registry::OwnerRegistry;
use crate::treasury::Treasury;
use crate::wallet::events::WalletEvent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// An M-of-N wallet
///
/// Every mutating call takes `&mut self` and either completes or leaves the
/// wallet exactly as it was.
///
/// Deserializing re-runs owner validation and cross-checks the stored
/// confirmation counts, so restored state obeys the same invariants as live state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WalletState", into = "WalletState")]
pub struct MultiSigWallet {
    /// The wallet's own identity
    address: Address,
    registry: OwnerRegistry,
    ledger: ActionLedger,
    tracker: ConfirmationTracker,
    treasury: Treasury,
    /// Event log, oldest first
    events: Vec<WalletEvent>,
}

impl MultiSigWallet {
    /// Create a wallet living at `address` governed by `owners`
    pub fn new(address: Address, owners: Vec<Address>, threshold: usize) -> Result<Self, MultiSigError> {
        let registry = OwnerRegistry::new(address, owners, threshold)?;
        info!(
            wallet = %address,
            owners = registry.len(),
            threshold,
            "wallet created"
        );

        Ok(Self {
            address,
            registry,
            ledger: ActionLedger::new(),
            tracker: ConfirmationTracker::new(),
            treasury: Treasury::new(),
            events: Vec::new(),
        })
    }

    /// Create a wallet from a loaded configuration
    pub fn from_config(config: &WalletConfig) -> Result<Self, MultiSigError> {
        Self::new(config.address, config.owners.clone(), config.threshold)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Owners in construction order
    pub fn owners(&self) -> &[Address] {
        self.registry.owners()
    }

    pub fn is_owner(&self, identity: &Address) -> bool {
        self.registry.is_owner(identity)
    }

    pub fn threshold(&self) -> usize {
        self.registry.threshold()
    }

    pub fn balance(&self) -> u64 {
        self.treasury.balance()
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    pub fn action(&self, id: ActionId) -> Result<&Action, MultiSigError> {
        self.ledger.get(id)
    }

    pub fn action_count(&self) -> u64 {
        self.ledger.count()
    }

    /// Every action in submission order
    pub fn actions(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.ledger.iter()
    }

    /// Indices of actions not yet executed
    pub fn pending_actions(&self) -> Vec<ActionId> {
        self.ledger.pending()
    }

    pub fn is_confirmed(&self, id: ActionId, owner: &Address) -> bool {
        self.tracker.is_confirmed(id, owner)
    }

    /// Owners currently confirming `id`
    pub fn confirmations(&self, id: ActionId) -> Vec<Address> {
        self.tracker.confirmations(id)
    }

    pub fn events(&self) -> &[WalletEvent] {
        &self.events
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Propose a transfer; returns its index
    pub fn submit(
        &mut self,
        caller: Address,
        recipient: Address,
        value: u64,
        payload: Vec<u8>,
    ) -> Result<ActionId, MultiSigError> {
        self.registry.ensure_owner(&caller)?;

        let id = self.ledger.append(recipient, value, payload.clone());
        debug!(action = id, %caller, %recipient, value, "action submitted");

        self.events.push(WalletEvent::Submitted {
            by: caller,
            recipient,
            action: id,
            value,
            payload,
        });
        Ok(id)
    }

    /// Record the caller's approval of action `id`
    pub fn confirm(&mut self, caller: Address, id: ActionId) -> Result<(), MultiSigError> {
        self.registry.ensure_owner(&caller)?;

        let count = self.tracker.confirm(&mut self.ledger, id, caller)?;
        debug!(action = id, %caller, confirmations = count, "action confirmed");

        self.events.push(WalletEvent::Confirmed {
            by: caller,
            action: id,
        });
        Ok(())
    }

    /// Withdraw the caller's earlier approval of action `id`
    pub fn revoke(&mut self, caller: Address, id: ActionId) -> Result<(), MultiSigError> {
        self.registry.ensure_owner(&caller)?;

        let count = self.tracker.revoke(&mut self.ledger, id, caller)?;
        debug!(action = id, %caller, confirmations = count, "confirmation revoked");

        self.events.push(WalletEvent::Revoked {
            by: caller,
            action: id,
        });
        Ok(())
    }

    /// Execute action `id` through `effect` once quorum is reached
    ///
    /// The action is flagged executed and the treasury debited before the
    /// effect runs. If the effect fails, the wallet is restored to its state
    /// at the start of this call, discarding anything done through reentrant
    /// calls as well.
    pub fn execute<E>(&mut self, caller: Address, id: ActionId, effect: &mut E) -> Result<(), MultiSigError>
    where
        E: Effect + ?Sized,
    {
        // Cheap rejection before taking a snapshot
        ExecutionEngine::new(&self.registry, &mut self.ledger, &mut self.treasury).check(&caller, id)?;

        let snapshot = self.clone();
        let transfer =
            ExecutionEngine::new(&self.registry, &mut self.ledger, &mut self.treasury).commit(&caller, id)?;

        if let Err(e) = effect.perform(self, &transfer) {
            warn!(action = id, %caller, error = %e, "effect failed, rolling back");
            *self = snapshot;
            return Err(MultiSigError::EffectFailed(e));
        }

        info!(
            action = id,
            %caller,
            recipient = %transfer.recipient(),
            value = transfer.value(),
            "action executed"
        );
        self.events.push(WalletEvent::Executed {
            by: caller,
            recipient: *transfer.recipient(),
            action: id,
            value: transfer.value(),
            payload: transfer.payload().to_vec(),
        });
        Ok(())
    }

    /// Fund the wallet; anyone may deposit
    pub fn deposit(&mut self, caller: Address, amount: u64) -> Result<(), MultiSigError> {
        let balance = self.treasury.deposit(amount)?;
        debug!(%caller, amount, balance, "deposit received");

        self.events.push(WalletEvent::Deposited { by: caller, amount });
        Ok(())
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    /// Serialize the wallet to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserialize a wallet from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

/// Serialized form of a wallet
///
/// The owner index is derived data and is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct WalletState {
    address: Address,
    owners: Vec<Address>,
    threshold: usize,
    ledger: ActionLedger,
    tracker: ConfirmationTracker,
    treasury: Treasury,
    events: Vec<WalletEvent>,
}

impl From<MultiSigWallet> for WalletState {
    fn from(wallet: MultiSigWallet) -> Self {
        Self {
            address: wallet.address,
            owners: wallet.registry.owners().to_vec(),
            threshold: wallet.registry.threshold(),
            ledger: wallet.ledger,
            tracker: wallet.tracker,
            treasury: wallet.treasury,
            events: wallet.events,
        }
    }
}

impl TryFrom<WalletState> for MultiSigWallet {
    type Error = MultiSigError;

    fn try_from(state: WalletState) -> Result<Self, Self::Error> {
        let registry = OwnerRegistry::new(state.address, state.owners, state.threshold)?;

        for (id, action) in state.ledger.iter() {
            let recorded = state.tracker.count(id);
            if action.confirmations() != recorded {
                return Err(MultiSigError::InconsistentState(format!(
                    "action {id} counts {} confirmations but {recorded} are recorded",
                    action.confirmations()
                )));
            }
            if action.is_executed() && recorded < registry.threshold() {
                return Err(MultiSigError::InconsistentState(format!(
                    "action {id} executed with {recorded} of {} confirmations",
                    registry.threshold()
                )));
            }
        }

        for (id, owners) in state.tracker.iter() {
            if id >= state.ledger.count() {
                return Err(MultiSigError::InconsistentState(format!(
                    "confirmations recorded for missing action {id}"
                )));
            }
            if let Some(stranger) = owners.iter().find(|owner| !registry.is_owner(owner)) {
                return Err(MultiSigError::InconsistentState(format!(
                    "action {id} confirmed by non-owner {stranger}"
                )));
            }
        }

        if !state.treasury.is_consistent() {
            return Err(MultiSigError::InconsistentState(
                "balance does not match deposits minus payouts".to_string(),
            ));
        }

        Ok(Self {
            address: state.address,
            registry,
            ledger: state.ledger,
            tracker: state.tracker,
            treasury: state.treasury,
            events: state.events,
        })
    }
}
