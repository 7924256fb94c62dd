// Owner registry - the fixed set of principals allowed to act on the wallet

use crate::error::MultiSigError;
use crate::identity::Address;
use std::collections::BTreeSet;

/// Immutable owner set plus the number of confirmations an action needs
///
/// Only `new` builds one, so a registry always holds a validated owner set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerRegistry {
    /// Owners in the order they were supplied at construction
    owners: Vec<Address>,
    /// Membership index over `owners`
    index: BTreeSet<Address>,
    /// Quorum threshold
    threshold: usize,
}

impl OwnerRegistry {
    /// Validate and build the registry for the wallet living at `wallet`
    ///
    /// Checks run in order: emptiness, then each entry (null or self identity,
    /// then repetition), then the threshold.
    pub fn new(wallet: Address, owners: Vec<Address>, threshold: usize) -> Result<Self, MultiSigError> {
        if owners.is_empty() {
            return Err(MultiSigError::InvalidOwnerSet);
        }

        let mut index = BTreeSet::new();
        for owner in &owners {
            if owner.is_zero() || *owner == wallet {
                return Err(MultiSigError::InvalidOwnerIdentity(*owner));
            }
            if !index.insert(*owner) {
                return Err(MultiSigError::DuplicateOwner(*owner));
            }
        }

        if threshold == 0 || threshold > owners.len() {
            return Err(MultiSigError::InvalidThreshold {
                threshold,
                owners: owners.len(),
            });
        }

        Ok(Self {
            owners,
            index,
            threshold,
        })
    }

    /// Is `identity` one of the owners?
    pub fn is_owner(&self, identity: &Address) -> bool {
        self.index.contains(identity)
    }

    /// Fail with `Unauthorized` unless `caller` is an owner
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), MultiSigError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(MultiSigError::Unauthorized(*caller))
        }
    }

    /// Owners in construction order
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Confirmations required before an action may execute
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
