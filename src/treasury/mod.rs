// Treasury module - Tracks what the wallet holds

mod balance;

pub use balance::Treasury;
