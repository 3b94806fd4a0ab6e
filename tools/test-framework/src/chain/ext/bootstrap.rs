use eyre::eyre;
use std::str;
use tracing::{debug, info};

use crate::chain::cli::bootstrap::{
    add_genesis_account, add_genesis_validator, add_wallet, collect_gen_txs, initialize,
    start_command,
};
use crate::chain::config;
use crate::chain::node::{ChainNode, FAUCET_KEY_NAME, RPC_PORT, VALIDATOR_KEY_NAME};
use crate::chain::wait::wait_for_first_block;
use crate::docker::{Container, Volume};
use crate::error::{handle_generic_error, Error};
use crate::ibc::token::Token;
use crate::types::wallet::{Wallet, WalletAddress};

/// Balance of the validator and of the extra genesis wallets.
pub const GENESIS_WALLET_AMOUNT: u128 = 10_000_000_000_000;

/// Balance of the faucet, which funds every test user.
pub const GENESIS_FAUCET_AMOUNT: u128 = 100_000_000_000_000_000;

pub const GENESIS_STAKE_AMOUNT: u128 = 1_000_000_000_000;

pub trait ChainBootstrapMethodsExt {
    /**
       Read the content at a file path relative to the chain home
       directory, and return the result as a string.

       This is not efficient but is sufficient for testing purposes.
    */
    fn read_file(&self, file_path: &str) -> Result<String, Error>;

    /**
       Write the string content to a file path relative to the chain home
       directory.
    */
    fn write_file(&self, file_path: &str, content: &str) -> Result<(), Error>;

    /**
       Modify a chain config file in the `config` directory, which is
       saved in toml format.
    */
    fn update_chain_config(
        &self,
        file: &str,
        cont: impl FnOnce(&mut toml::Value) -> Result<(), Error>,
    ) -> Result<(), Error>;

    /**
       Modify the genesis file of the chain.
    */
    fn update_genesis_file(
        &self,
        cont: impl FnOnce(&mut serde_json::Value) -> Result<(), Error>,
    ) -> Result<(), Error>;

    /**
       Create the home volume of the node and initialize the chain data
       stores in it. The node joins the given docker network.
    */
    fn initialize(&self, network: &str) -> Result<(), Error>;

    /**
       Add a wallet with the given key name to the node keyring.
    */
    fn add_wallet(&self, key_name: &str) -> Result<Wallet, Error>;

    /**
       Add a wallet address to the genesis account list for an uninitialized
       node.
    */
    fn add_genesis_account(&self, wallet: &WalletAddress, amounts: &[&Token]) -> Result<(), Error>;

    /**
       Add the key with the given stake amount to be the genesis validator
       for an uninitialized chain.
    */
    fn add_genesis_validator(&self, key_name: &str, token: &Token) -> Result<(), Error>;

    /**
       Call `collect-gentxs` to generate the genesis transactions.
    */
    fn collect_gen_txs(&self) -> Result<(), Error>;

    /**
       Create the genesis of an initialized chain: the validator, the
       faucet and one funded wallet for each of the extra key names,
       which are used for the relayer accounts.
    */
    fn create_genesis(&self, extra_key_names: &[String]) -> Result<(), Error>;

    /**
       Start the node container in the background and wait for the chain
       to produce its first block.
    */
    fn start(&self) -> Result<(), Error>;
}

impl ChainBootstrapMethodsExt for ChainNode {
    fn read_file(&self, file_path: &str) -> Result<String, Error> {
        let state = self.read_state()?;

        let volume = state
            .volume
            .as_ref()
            .ok_or_else(|| eyre!("chain {} has no home volume", self.chain_id()))?;

        let content = volume.read_file(file_path)?;

        Ok(str::from_utf8(&content)
            .map_err(handle_generic_error)?
            .to_string())
    }

    fn write_file(&self, file_path: &str, content: &str) -> Result<(), Error> {
        let state = self.read_state()?;

        let volume = state
            .volume
            .as_ref()
            .ok_or_else(|| eyre!("chain {} has no home volume", self.chain_id()))?;

        volume.write_file(file_path, content.as_bytes())?;

        // The busybox container writes as root.
        volume.set_owner(self.image()?.uid_gid.as_str())?;

        debug!("wrote file {} of chain {}", file_path, self.chain_id());

        Ok(())
    }

    fn update_chain_config(
        &self,
        file: &str,
        cont: impl FnOnce(&mut toml::Value) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let config_path = format!("config/{}", file);

        let config1 = self.read_file(&config_path)?;

        let mut config2 = toml::from_str(&config1).map_err(handle_generic_error)?;

        cont(&mut config2)?;

        let config3 = toml::to_string_pretty(&config2).map_err(handle_generic_error)?;

        self.write_file(&config_path, &config3)?;

        Ok(())
    }

    fn update_genesis_file(
        &self,
        cont: impl FnOnce(&mut serde_json::Value) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let config1 = self.read_file("config/genesis.json")?;

        let mut config2 = serde_json::from_str(&config1)?;

        cont(&mut config2)?;

        let config3 = serde_json::to_string_pretty(&config2)?;

        self.write_file("config/genesis.json", &config3)?;

        Ok(())
    }

    fn initialize(&self, network: &str) -> Result<(), Error> {
        let volume = Volume::create(&self.docker, &self.container_name)?;
        volume.set_owner(self.image()?.uid_gid.as_str())?;

        {
            let mut state = self.write_state()?;
            state.volume = Some(volume);
            state.network = Some(network.to_string());
        }

        initialize(
            self,
            &self.config.bin,
            self.chain_id(),
            &self.home_dir(),
            &self.container_name,
        )?;

        info!(
            "initialized chain {} in volume {}",
            self.chain_id(),
            self.container_name
        );

        Ok(())
    }

    fn add_wallet(&self, key_name: &str) -> Result<Wallet, Error> {
        let wallet = add_wallet(self, &self.config.bin, &self.home_dir(), key_name)?;

        debug!(
            "added wallet {} with address {} on chain {}",
            key_name,
            wallet.address,
            self.chain_id()
        );

        Ok(wallet)
    }

    fn add_genesis_account(&self, wallet: &WalletAddress, amounts: &[&Token]) -> Result<(), Error> {
        let amounts_str = amounts.iter().map(|t| t.to_string()).collect::<Vec<_>>();

        add_genesis_account(
            self,
            &self.config.bin,
            &self.home_dir(),
            self.config.genesis_subcommand,
            wallet.as_str(),
            &amounts_str,
        )
    }

    fn add_genesis_validator(&self, key_name: &str, token: &Token) -> Result<(), Error> {
        add_genesis_validator(
            self,
            &self.config.bin,
            self.chain_id(),
            &self.home_dir(),
            self.config.genesis_subcommand,
            key_name,
            &token.to_string(),
        )
    }

    fn collect_gen_txs(&self) -> Result<(), Error> {
        collect_gen_txs(
            self,
            &self.config.bin,
            &self.home_dir(),
            self.config.genesis_subcommand,
        )
    }

    fn create_genesis(&self, extra_key_names: &[String]) -> Result<(), Error> {
        let denom = self.denom().to_string();

        self.update_genesis_file(|genesis| Ok(config::set_staking_denom(genesis, &denom)?))?;

        let mut key_names = vec![VALIDATOR_KEY_NAME.to_string(), FAUCET_KEY_NAME.to_string()];
        key_names.extend(extra_key_names.iter().cloned());

        for key_name in key_names {
            let wallet = self.add_wallet(&key_name)?;

            let amount = if key_name == FAUCET_KEY_NAME {
                GENESIS_FAUCET_AMOUNT
            } else {
                GENESIS_WALLET_AMOUNT
            };

            self.add_genesis_account(&wallet.address, &[&Token::new(&denom, amount)])?;

            self.write_state()?.wallets.insert(key_name, wallet);
        }

        self.add_genesis_validator(
            VALIDATOR_KEY_NAME,
            &Token::new(&denom, GENESIS_STAKE_AMOUNT),
        )?;

        self.collect_gen_txs()?;

        let block_time = self.config.block_time;

        self.update_chain_config("config.toml", |config| {
            config::set_rpc_port(config, RPC_PORT)?;
            config::set_allow_duplicate_ip(config, true)?;
            config::set_timeout_commit(config, block_time)?;
            config::set_timeout_propose(config, block_time)?;
            Ok(())
        })?;

        let gas_prices = self.config.gas_prices.clone();

        self.update_chain_config("app.toml", |config| {
            config::set_minimum_gas_price(config, &gas_prices)?;
            config::disable_api(config)?;
            Ok(())
        })?;

        Ok(())
    }

    fn start(&self) -> Result<(), Error> {
        let home_dir = self.home_dir();

        let spec = {
            let state = self.read_state()?;

            let volume = state
                .volume
                .as_ref()
                .ok_or_else(|| eyre!("chain {} is not initialized", self.chain_id()))?;

            // Other containers resolve the node by its name only on a
            // shared network.
            let network = state.network.as_deref().ok_or_else(|| {
                Error::invalid_topology(format!(
                    "chain {} must join a docker network",
                    self.chain_id()
                ))
            })?;

            self.container_spec(Some(network), volume.name())?
                .with_name(&self.container_name)
        };

        let container = Container::start(
            &self.docker,
            &spec,
            &start_command(&self.config.bin, &home_dir),
        )?
        .with_log_file(&self.log_file());

        self.write_state()?.container = Some(container);

        info!(
            "started chain {} in container {}, waiting for the first block",
            self.chain_id(),
            self.container_name
        );

        wait_for_first_block(self)?;

        Ok(())
    }
}
