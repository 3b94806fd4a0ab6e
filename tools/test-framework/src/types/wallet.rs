/*!
   Types for information about a chain wallet.
*/

use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

use crate::types::env::{EnvWriter, ExportEnv};

/**
   Newtype wrapper for the bech32 address of a wallet.
*/
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WalletAddress(pub String);

/**
   A wallet whose key lives in the `test` keyring of a chain node, and
   can therefore sign transactions through the chain CLI.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    /// The name of the key in the keyring.
    pub key_name: String,

    pub address: WalletAddress,

    /**
       The mnemonic of the key, so that it can be restored into the
       relayer keyring.
    */
    pub mnemonic: String,
}

impl Wallet {
    pub fn new(key_name: String, address: String, mnemonic: String) -> Self {
        Self {
            key_name,
            address: WalletAddress(address),
            mnemonic,
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn address(&self) -> &WalletAddress {
        &self.address
    }
}

/**
   An amount of tokens to be sent to an address.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAmount {
    pub address: WalletAddress,

    pub denom: String,

    pub amount: u128,
}

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ExportEnv for Wallet {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        writer.write_env("KEY_NAME", &self.key_name);
        writer.write_env("ADDRESS", self.address.as_str());
    }
}
