//! quorum-vault: an M-of-N multi-owner wallet.
//!
//! A fixed set of owners submits actions (a value transfer plus opaque payload),
//! confirms or revokes them, and executes them once a quorum of confirmations
//! is reached. Execution is all-or-nothing: the action is marked executed and
//! the treasury debited before the external [`execution::Effect`] runs, and a
//! failing effect rolls every write back.

pub mod config;
pub mod confirmation;
pub mod error;
pub mod execution;
pub mod identity;
pub mod ledger;
pub mod registry;
pub mod storage;
pub mod treasury;
pub mod wallet;

pub use error::MultiSigError;
pub use wallet::{MultiSigWallet, WalletEvent};
