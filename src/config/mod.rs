// Config module - how a wallet is described on disk

mod wallet_config;

pub use wallet_config::{ConfigError, WalletConfig};
