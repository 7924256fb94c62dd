// Registry module - WHO MAY ACT
// Holds the immutable owner set and quorum threshold

mod owners;

pub use owners::OwnerRegistry;
