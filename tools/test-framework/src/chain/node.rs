/*!
   Type definition for a single chain node running in a docker container.
*/

use eyre::eyre;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::chain::cli::query::{query_balance, query_latest_height};
use crate::chain::cli::transfer::bank_send;
use crate::chain::exec::{CommandExecutor, ExecOutput};
use crate::chain::spec::ChainConfig;
use crate::docker::{Container, ContainerSpec, Docker, DockerImage, Volume};
use crate::error::Error;
use crate::ibc::token::Token;
use crate::types::env::{prefix_writer, EnvWriter, ExportEnv};
use crate::types::wallet::{Wallet, WalletAddress, WalletAmount};

/// The port the chain RPC listens on inside the container.
pub const RPC_PORT: u16 = 26657;

/// The key funding the test users created by
/// [`get_and_fund_test_users`](crate::bootstrap::users::get_and_fund_test_users).
pub const FAUCET_KEY_NAME: &str = "faucet";

pub const VALIDATOR_KEY_NAME: &str = "validator";

/**
   Represents a chain with a single validator node, running in a docker
   container attached to the network of the test.

   A node is created unstarted by the
   [`ChainFactory`](crate::chain::factory::ChainFactory), and is
   bootstrapped and started by
   [`Interchain::build`](crate::interchain::Interchain::build). The
   container and its home volume are removed when the node is dropped.
*/
pub struct ChainNode {
    pub config: ChainConfig,

    /**
       The name of the container running the node, which is also its
       hostname on the docker network.
    */
    pub container_name: String,

    pub(crate) docker: Docker,

    /// Where the container output is saved before removal.
    pub log_dir: PathBuf,

    state: RwLock<NodeState>,
}

#[derive(Default)]
pub(crate) struct NodeState {
    // Declared before the volume so that the container is removed first.
    pub(crate) container: Option<Container>,

    pub(crate) volume: Option<Volume>,

    pub(crate) network: Option<String>,

    /// The wallets created in the genesis, by key name.
    pub(crate) wallets: BTreeMap<String, Wallet>,
}

impl ChainNode {
    pub fn new(config: ChainConfig, container_name: String, docker: Docker, log_dir: PathBuf) -> Self {
        Self {
            config,
            container_name,
            docker,
            log_dir,
            state: RwLock::new(NodeState::default()),
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn chain_id(&self) -> &str {
        &self.config.chain_id
    }

    pub fn denom(&self) -> &str {
        &self.config.denom
    }

    pub fn bech32_prefix(&self) -> &str {
        &self.config.bech32_prefix
    }

    pub fn image(&self) -> Result<&DockerImage, Error> {
        self.config.image()
    }

    /// The home directory of the node inside its container.
    pub fn home_dir(&self) -> String {
        format!("/var/cosmos-chain/{}", self.config.name)
    }

    /**
       Returns the RPC address of the node as used by the chain CLI,
       which requires the `"tcp://"` scheme.
    */
    pub fn rpc_address(&self) -> String {
        format!("tcp://{}:{}", self.container_name, RPC_PORT)
    }

    /// Returns the RPC address of the node as used by the relayer.
    pub fn http_rpc_address(&self) -> String {
        format!("http://{}:{}", self.container_name, RPC_PORT)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(format!("{}.log", self.container_name))
    }

    pub(crate) fn read_state(&self) -> Result<RwLockReadGuard<'_, NodeState>, Error> {
        Ok(self.state.read().map_err(|_| eyre!("poisoned lock"))?)
    }

    pub(crate) fn write_state(&self) -> Result<RwLockWriteGuard<'_, NodeState>, Error> {
        Ok(self.state.write().map_err(|_| eyre!("poisoned lock"))?)
    }

    pub fn is_running(&self) -> Result<bool, Error> {
        Ok(self.read_state()?.container.is_some())
    }

    /**
       Get a wallet that was created in the genesis of the chain,
       such as the faucet or a relayer wallet.
    */
    pub fn genesis_wallet(&self, key_name: &str) -> Result<Wallet, Error> {
        self.read_state()?
            .wallets
            .get(key_name)
            .cloned()
            .ok_or_else(|| {
                Error::generic(eyre!(
                    "no genesis wallet {} on chain {}",
                    key_name,
                    self.chain_id()
                ))
            })
    }

    /// The spec of the containers running commands against the node home.
    pub(crate) fn container_spec(&self, network: Option<&str>, volume: &str) -> Result<ContainerSpec, Error> {
        let mut spec = ContainerSpec::new(self.image()?).with_volume(volume, &self.home_dir());

        if let Some(network) = network {
            spec = spec.with_network(network);
        }

        Ok(spec)
    }

    pub fn height(&self) -> Result<u64, Error> {
        query_latest_height(self, &self.config.bin, &self.rpc_address())
    }

    /**
       Query for the balance of a given wallet address and denomination.
    */
    pub fn get_balance(&self, address: &WalletAddress, denom: &str) -> Result<u128, Error> {
        query_balance(
            self,
            &self.config.bin,
            &self.rpc_address(),
            address.as_str(),
            denom,
        )
    }

    /**
       Send tokens from the key `key_name` of the node keyring to the
       given address, on this chain.
    */
    pub fn send_funds(&self, key_name: &str, amount: &WalletAmount) -> Result<(), Error> {
        let token = Token::new(&amount.denom, amount.amount);

        info!(
            "sending {} from {} to {} on chain {}",
            token,
            key_name,
            amount.address,
            self.chain_id()
        );

        bank_send(
            self,
            &self.config.bin,
            self.chain_id(),
            &self.home_dir(),
            &self.rpc_address(),
            key_name,
            amount.address.as_str(),
            &token.to_string(),
            &self.config.gas_prices,
            self.config.gas_adjustment,
        )
    }

    /**
       Stop the node container. Queries and transactions fail until the
       node is started again.
    */
    pub fn stop(&self) -> Result<(), Error> {
        let container = self.write_state()?.container.take();

        if let Some(mut container) = container {
            container.stop()?;
            info!("stopped chain {}", self.chain_id());
        }

        Ok(())
    }
}

impl CommandExecutor for ChainNode {
    /**
       Run the command inside the node container when the node is running,
       or in a one-shot container sharing the node home otherwise.
    */
    fn exec(&self, args: &[&str]) -> Result<ExecOutput, Error> {
        let state = self.read_state()?;

        if let Some(container) = &state.container {
            return container.exec(args);
        }

        let volume = state.volume.as_ref().ok_or_else(|| {
            Error::generic(eyre!(
                "chain {} must be initialized before running commands",
                self.chain_id()
            ))
        })?;

        let spec = self.container_spec(state.network.as_deref(), volume.name())?;

        self.docker.run_oneshot(&spec, args)
    }
}

impl ExportEnv for ChainNode {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        writer.write_env("CHAIN_ID", self.chain_id());
        writer.write_env("CMD", &self.config.bin);
        writer.write_env("CONTAINER", &self.container_name);
        writer.write_env("HOME", &self.home_dir());
        writer.write_env("RPC_ADDR", &self.rpc_address());
        writer.write_env("DENOM", self.denom());

        if let Ok(state) = self.read_state() {
            for (key_name, wallet) in state.wallets.iter() {
                wallet.export_env(&mut prefix_writer(&format!("WALLETS_{}", key_name), writer));
            }
        }
    }
}
