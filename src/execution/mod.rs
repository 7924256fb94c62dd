// Execution module - WHEN AN ACTION FIRES
// Quorum gating, checks-effects-interactions commit, and the effect seam

mod effect;
mod engine;

pub use effect::{Effect, EffectError, MockEffect, PayoutBook, PayoutReceipt, Transfer};
pub use engine::ExecutionEngine;
