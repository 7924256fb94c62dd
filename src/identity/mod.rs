// Identity module - who can act on the wallet
// Addresses for owners and recipients, secp256k1 keypairs that derive them

mod address;
mod keypair;

pub use address::{Address, AddressError, ADDRESS_LEN};
pub use keypair::{Keypair, KeypairError};
