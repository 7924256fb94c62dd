// Ledger module - WHAT IS PROPOSED
// Append-only storage of submitted actions

mod action;
mod actions;

pub use action::{Action, ActionId};
pub use actions::ActionLedger;
