/*!
   Creation of the chain nodes of a test from chain specs.
*/

use tracing::debug;

use crate::chain::node::ChainNode;
use crate::chain::spec::{ChainConfig, ChainSpec};
use crate::error::Error;
use crate::types::config::TestConfig;
use crate::util::random::sanitize_name;

pub struct ChainFactory {
    config: TestConfig,
    specs: Vec<ChainSpec>,
}

impl ChainFactory {
    pub fn new(config: &TestConfig, specs: Vec<ChainSpec>) -> Self {
        Self {
            config: config.clone(),
            specs,
        }
    }

    /**
       Resolve the chain specs into unstarted [`ChainNode`]s, in the order
       of the specs.

       Chains without an explicit chain id get `<name>-<n>`, with `n` the
       1-based position of the spec.
    */
    pub fn chains(&self, test_name: &str) -> Result<Vec<ChainNode>, Error> {
        self.resolve_configs()?
            .into_iter()
            .map(|config| {
                let container_name = container_name(test_name, &self.config.test_id, &config.chain_id);

                debug!(
                    "creating chain {} with container {}",
                    config.chain_id, container_name
                );

                Ok(ChainNode::new(
                    config,
                    container_name,
                    self.config.docker(),
                    self.config.chain_store_dir.clone(),
                ))
            })
            .collect()
    }

    pub fn resolve_configs(&self) -> Result<Vec<ChainConfig>, Error> {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let mut config = spec.resolve()?;

                if config.chain_id.is_empty() {
                    config.chain_id = format!("{}-{}", config.name, i + 1);
                }

                Ok(config)
            })
            .collect()
    }
}

/**
   Docker container names are global to the docker host, so they carry
   both the test name and the random id of the test run.
*/
pub fn container_name(test_name: &str, test_id: &str, chain_id: &str) -> String {
    sanitize_name(&format!("{}-{}-{}-val-0", test_name, test_id, chain_id))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn test_config() -> TestConfig {
        TestConfig {
            test_id: "1234".to_string(),
            docker_command_path: "docker".to_string(),
            chain_store_dir: PathBuf::from("data/test-1234"),
            pull_images: false,
            keep_containers: false,
        }
    }

    #[test]
    fn chain_ids_follow_spec_order() -> Result<(), Error> {
        let factory = ChainFactory::new(
            &test_config(),
            vec![ChainSpec::new("icad", "v0.3.5"), ChainSpec::new("icad", "v0.3.5")],
        );

        let configs = factory.resolve_configs()?;

        let chain_ids = configs.iter().map(|c| c.chain_id.as_str()).collect::<Vec<_>>();
        assert_eq!(chain_ids, vec!["icad-1", "icad-2"]);

        Ok(())
    }

    #[test]
    fn explicit_chain_id_is_kept() -> Result<(), Error> {
        let mut spec = ChainSpec::new("gaia", "");
        let mut config = spec.resolve()?;
        config.chain_id = "cosmoshub-test".to_string();
        spec = spec.with_chain_config(config);

        let configs = ChainFactory::new(&test_config(), vec![spec]).resolve_configs()?;

        assert_eq!(configs[0].chain_id, "cosmoshub-test");

        Ok(())
    }

    #[test]
    fn nodes_get_unique_container_names() -> Result<(), Error> {
        let factory = ChainFactory::new(
            &test_config(),
            vec![ChainSpec::new("icad", "v0.3.5"), ChainSpec::new("icad", "v0.3.5")],
        );

        let chains = factory.chains("TestInterchainAccounts")?;

        assert_eq!(
            chains[0].container_name,
            "testinterchainaccounts-1234-icad-1-val-0"
        );
        assert_eq!(chains[0].home_dir(), "/var/cosmos-chain/icad");
        assert_eq!(
            chains[1].rpc_address(),
            "tcp://testinterchainaccounts-1234-icad-2-val-0:26657"
        );

        Ok(())
    }

    #[test]
    fn unknown_chain_is_rejected() {
        let res = ChainFactory::new(&test_config(), vec![ChainSpec::new("unknown", "v1")])
            .resolve_configs();

        assert!(res.is_err());
    }
}
