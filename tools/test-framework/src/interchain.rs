/*!
   Assembly of a network of chains connected by relayers.
*/

use std::collections::BTreeSet;
use std::ptr;
use tracing::info;

use crate::chain::ext::bootstrap::ChainBootstrapMethodsExt;
use crate::chain::node::ChainNode;
use crate::error::Error;
use crate::relayer::driver::{ChannelOptions, CreateClientOptions, RelayerDriver};
use crate::types::env::{prefix_writer, EnvWriter, ExportEnv};
use crate::util::random::sanitize_name;

/**
   A path between two chains of the interchain, relayed by one of its
   relayers.
*/
pub struct InterchainLink<'a> {
    pub chain1: &'a ChainNode,
    pub chain2: &'a ChainNode,
    pub relayer: &'a RelayerDriver,

    /// The name of the relayer path.
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct InterchainBuildOptions {
    pub test_name: String,

    /// The docker network joined by the chain nodes.
    pub network: String,

    /// Pull the images of the chains and relayers before starting them.
    pub pull_images: bool,

    /**
       Leave the paths of the links without clients, connections and
       channels, so that the test can create them itself.
    */
    pub skip_path_creation: bool,
}

/**
   Builder of the topology of a test: the chains, the named relayers and
   the links relayed between chains.

   ```rust,ignore
   let interchain = Interchain::new()
       .add_chain(&chain1)
       .add_chain(&chain2)
       .add_relayer(&relayer, "relayer")
       .add_link(InterchainLink {
           chain1: &chain1,
           chain2: &chain2,
           relayer: &relayer,
           path: "test-path".to_string(),
       });

   interchain.build(&options)?;
   ```
*/
#[derive(Default)]
pub struct Interchain<'a> {
    chains: Vec<&'a ChainNode>,
    relayers: Vec<(&'a RelayerDriver, String)>,
    links: Vec<InterchainLink<'a>>,
}

impl<'a> Interchain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chain(mut self, chain: &'a ChainNode) -> Self {
        self.chains.push(chain);
        self
    }

    pub fn add_relayer(mut self, relayer: &'a RelayerDriver, name: &str) -> Self {
        self.relayers.push((relayer, name.to_string()));
        self
    }

    pub fn add_link(mut self, link: InterchainLink<'a>) -> Self {
        self.links.push(link);
        self
    }

    /**
       Check that chains and relayers are registered once, and that every
       link refers to registered chains and relayers.
    */
    pub fn validate(&self) -> Result<(), Error> {
        let mut chain_ids = BTreeSet::new();
        for chain in self.chains.iter() {
            if !chain_ids.insert(chain.chain_id()) {
                return Err(Error::invalid_topology(format!(
                    "chain {} is added more than once",
                    chain.chain_id()
                )));
            }
        }

        let mut relayer_names = BTreeSet::new();
        for (_, name) in self.relayers.iter() {
            if !relayer_names.insert(name.as_str()) {
                return Err(Error::invalid_topology(format!(
                    "relayer name {} is used more than once",
                    name
                )));
            }
        }

        let mut paths = BTreeSet::new();
        for link in self.links.iter() {
            for chain in [link.chain1, link.chain2] {
                if !self.has_chain(chain) {
                    return Err(Error::invalid_topology(format!(
                        "link {} refers to chain {} which is not in the interchain",
                        link.path,
                        chain.chain_id()
                    )));
                }
            }

            if link.chain1.chain_id() == link.chain2.chain_id() {
                return Err(Error::invalid_topology(format!(
                    "link {} connects chain {} to itself",
                    link.path,
                    link.chain1.chain_id()
                )));
            }

            if self.relayer_name(link.relayer).is_none() {
                return Err(Error::invalid_topology(format!(
                    "link {} refers to a relayer which is not in the interchain",
                    link.path
                )));
            }

            if !paths.insert(link.path.as_str()) {
                return Err(Error::invalid_topology(format!(
                    "path {} is used by more than one link",
                    link.path
                )));
            }
        }

        Ok(())
    }

    fn has_chain(&self, chain: &ChainNode) -> bool {
        self.chains.iter().any(|c| ptr::eq(*c, chain))
    }

    fn relayer_name(&self, relayer: &RelayerDriver) -> Option<&str> {
        self.relayers
            .iter()
            .find(|(r, _)| ptr::eq(*r, relayer))
            .map(|(_, name)| name.as_str())
    }

    /**
       The key of the relayer in the keyring of every chain, which is
       funded in the genesis of the chains.
    */
    pub fn relayer_key_name(relayer_name: &str) -> String {
        sanitize_name(relayer_name)
    }

    /**
       Start the chains and configure the relayers of the interchain:

       1. Pull the chain and relayer images when enabled.
       2. Create the genesis of every chain with a funded wallet for
          every relayer, and start the chains.
       3. Set up every relayer, adding the chains of its links with the
          relayer wallet of each chain.
       4. Unless `skip_path_creation` is set, create the path, clients,
          connection and `transfer` channel of every link.
    */
    pub fn build(&self, options: &InterchainBuildOptions) -> Result<(), Error> {
        self.validate()?;

        info!(
            "building interchain for test {} with {} chains and {} relayers",
            options.test_name,
            self.chains.len(),
            self.relayers.len()
        );

        if options.pull_images {
            let mut pulled = BTreeSet::new();
            for chain in self.chains.iter() {
                let image = chain.image()?;
                if pulled.insert(image.reference()) {
                    chain.docker.pull_image(image)?;
                }
            }

            for (relayer, _) in self.relayers.iter() {
                relayer.pull_image()?;
            }
        }

        let relayer_keys = self
            .relayers
            .iter()
            .map(|(_, name)| Self::relayer_key_name(name))
            .collect::<Vec<_>>();

        for chain in self.chains.iter() {
            chain.initialize(&options.network)?;
            chain.create_genesis(&relayer_keys)?;
            chain.start()?;
        }

        for (relayer, name) in self.relayers.iter() {
            relayer.setup()?;

            let key_name = Self::relayer_key_name(name);

            let mut added = BTreeSet::new();
            for link in self.links.iter().filter(|l| ptr::eq(l.relayer, *relayer)) {
                for chain in [link.chain1, link.chain2] {
                    if added.insert(chain.chain_id()) {
                        relayer.add_chain(chain, &chain.genesis_wallet(&key_name)?)?;
                    }
                }
            }
        }

        if options.skip_path_creation {
            return Ok(());
        }

        for link in self.links.iter() {
            link.relayer
                .generate_path(link.chain1.chain_id(), link.chain2.chain_id(), &link.path)?;

            link.relayer.create_clients(
                &link.path,
                &CreateClientOptions {
                    trusting_period: link.chain1.config.trusting_period.clone(),
                },
            )?;

            link.relayer.create_connections(&link.path)?;

            link.relayer
                .create_channel(&link.path, &ChannelOptions::default())?;
        }

        Ok(())
    }
}

impl<'a> ExportEnv for Interchain<'a> {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        for (i, chain) in self.chains.iter().enumerate() {
            chain.export_env(&mut prefix_writer(&format!("CHAIN_{}", i + 1), writer));
        }

        for (relayer, name) in self.relayers.iter() {
            relayer.export_env(&mut prefix_writer(name, writer));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::chain::spec::ChainSpec;
    use crate::docker::Docker;
    use crate::error::ErrorDetail;

    fn chain(chain_id: &str) -> Result<ChainNode, Error> {
        let mut config = ChainSpec::new("icad", "v0.3.5").resolve()?;
        config.chain_id = chain_id.to_string();

        Ok(ChainNode::new(
            config,
            format!("ica-{}-val-0", chain_id),
            Docker::new("docker", false),
            PathBuf::from("data"),
        ))
    }

    fn assert_invalid_topology(res: Result<(), Error>) {
        match res.map_err(|e| e.into_detail()) {
            Err(ErrorDetail::InvalidTopology(_)) => {}
            other => panic!("expected invalid topology, got {other:?}"),
        }
    }

    #[test]
    fn distinct_chains_are_valid() -> Result<(), Error> {
        let chain1 = chain("icad-1")?;
        let chain2 = chain("icad-2")?;

        Interchain::new()
            .add_chain(&chain1)
            .add_chain(&chain2)
            .validate()
    }

    #[test]
    fn duplicate_chain_is_rejected() -> Result<(), Error> {
        let chain1 = chain("icad-1")?;
        let chain2 = chain("icad-1")?;

        assert_invalid_topology(
            Interchain::new()
                .add_chain(&chain1)
                .add_chain(&chain2)
                .validate(),
        );

        Ok(())
    }

    #[test]
    fn relayer_key_is_sanitized_name() {
        assert_eq!(Interchain::relayer_key_name("Relayer A"), "relayer-a");
    }
}
