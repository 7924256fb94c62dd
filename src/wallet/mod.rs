// Wallet module - THE MULTI-OWNER WALLET
// Composes registry, ledger, confirmations, treasury and execution behind one API

mod events;
mod multisig;

pub use events::WalletEvent;
pub use multisig::MultiSigWallet;
