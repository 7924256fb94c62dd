// Confirmation module - WHO APPROVED WHAT
// Per-action, per-owner confirmation records and live counts

mod tracker;

pub use tracker::ConfirmationTracker;
