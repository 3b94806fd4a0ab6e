use serde::Serialize;
use tracing::info;

use crate::chain::cli::ica::{
    interchain_submit, query_interchain_account, register_interchain_account,
};
use crate::chain::node::ChainNode;
use crate::error::Error;
use crate::types::wallet::WalletAddress;

/**
   Interchain account commands of the `intertx` module, sent by an owner
   account of the controller chain. The owner must have its key in the
   keyring of the node.
*/
pub trait InterchainAccountMethodsExt {
    fn register_interchain_account(
        &self,
        from: &WalletAddress,
        connection_id: &str,
    ) -> Result<(), Error>;

    /**
       Query the address, on the host chain, of the interchain account
       owned by `from` over the given connection.
    */
    fn query_interchain_account(
        &self,
        from: &WalletAddress,
        connection_id: &str,
    ) -> Result<WalletAddress, Error>;

    /**
       Submit a message, serialized as JSON, to be executed by the
       interchain account of `from` on the host chain.
    */
    fn interchain_submit<T: Serialize>(
        &self,
        from: &WalletAddress,
        connection_id: &str,
        msg: &T,
    ) -> Result<(), Error>;
}

impl InterchainAccountMethodsExt for ChainNode {
    fn register_interchain_account(
        &self,
        from: &WalletAddress,
        connection_id: &str,
    ) -> Result<(), Error> {
        info!(
            "registering interchain account of {} over {} on chain {}",
            from,
            connection_id,
            self.chain_id()
        );

        register_interchain_account(
            self,
            &self.config.bin,
            self.chain_id(),
            &self.home_dir(),
            &self.rpc_address(),
            from.as_str(),
            connection_id,
        )
    }

    fn query_interchain_account(
        &self,
        from: &WalletAddress,
        connection_id: &str,
    ) -> Result<WalletAddress, Error> {
        let address = query_interchain_account(
            self,
            &self.config.bin,
            self.chain_id(),
            &self.home_dir(),
            &self.rpc_address(),
            from.as_str(),
            connection_id,
        )?;

        Ok(WalletAddress(address))
    }

    fn interchain_submit<T: Serialize>(
        &self,
        from: &WalletAddress,
        connection_id: &str,
        msg: &T,
    ) -> Result<(), Error> {
        let msg_str = serde_json::to_string(msg)?;

        info!(
            "submitting interchain message from {} over {}: {}",
            from, connection_id, msg_str
        );

        interchain_submit(
            self,
            &self.config.bin,
            self.chain_id(),
            &self.home_dir(),
            &self.rpc_address(),
            from.as_str(),
            connection_id,
            &msg_str,
        )
    }
}
