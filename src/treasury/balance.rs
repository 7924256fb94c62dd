// Balance tracking for the wallet's single-asset treasury

use crate::error::MultiSigError;
use serde::{Deserialize, Serialize};

/// Value held by the wallet and available to executed actions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    balance: u64,
    /// Lifetime sum of deposits; wider than `balance` so it never caps deposits
    total_deposited: u128,
    /// Lifetime sum of value paid out by executed actions
    total_paid_out: u128,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Check if the treasury can cover `amount`
    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    pub fn total_deposited(&self) -> u128 {
        self.total_deposited
    }

    pub fn total_paid_out(&self) -> u128 {
        self.total_paid_out
    }

    /// Credit an inbound deposit, returning the new balance
    ///
    /// Only the balance itself can overflow.
    pub fn deposit(&mut self, amount: u64) -> Result<u64, MultiSigError> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(MultiSigError::BalanceOverflow)?;

        self.balance = balance;
        self.total_deposited = self.total_deposited.saturating_add(u128::from(amount));
        Ok(balance)
    }

    /// Does the balance equal everything deposited minus everything paid out?
    pub fn is_consistent(&self) -> bool {
        self.total_paid_out <= self.total_deposited
            && self.total_deposited - self.total_paid_out == u128::from(self.balance)
    }

    /// Debit an outbound payment, returning the new balance
    pub fn debit(&mut self, amount: u64) -> Result<u64, MultiSigError> {
        if !self.can_afford(amount) {
            return Err(MultiSigError::InsufficientBalance {
                available: self.balance,
                required: amount,
            });
        }

        self.balance -= amount;
        self.total_paid_out = self.total_paid_out.saturating_add(u128::from(amount));
        Ok(self.balance)
    }
}
