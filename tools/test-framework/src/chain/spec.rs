/*!
   Chain specifications: the name and version of a chain to run in a
   test, resolved against a table of built-in chain configurations.
*/

use core::time::Duration;

use crate::chain::chain_type::ChainType;
use crate::docker::DockerImage;
use crate::error::Error;

/**
   Everything needed to bootstrap and talk to a chain node.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub chain_type: ChainType,

    /// The name of the chain, e.g. `icad`.
    pub name: String,

    /// Assigned by the [`ChainFactory`](crate::chain::factory::ChainFactory)
    /// when left empty.
    pub chain_id: String,

    /// The chain binary inside the image.
    pub bin: String,

    pub bech32_prefix: String,

    /// The denomination used for staking, fees and test wallets.
    pub denom: String,

    pub gas_prices: String,

    pub gas_adjustment: f64,

    /// Trusting period used when the relayer creates clients for this chain.
    pub trusting_period: String,

    /// Candidate images, the first one is used to run the chain.
    pub images: Vec<DockerImage>,

    /// Target time between blocks, written to `consensus.timeout_commit`.
    pub block_time: Duration,

    /**
       Cosmos SDK v0.47 moved the genesis commands under a `genesis`
       subcommand. Set this for chains based on newer SDKs.
    */
    pub genesis_subcommand: bool,
}

/**
   A request for a chain to run in a test. Fields that are left empty
   are filled in from the built-in configuration of the chain `name`.
*/
#[derive(Debug, Clone, Default)]
pub struct ChainSpec {
    pub name: String,

    /// Overrides the version of the first image of the chain.
    pub version: String,

    pub chain_config: Option<ChainConfig>,
}

impl ChainConfig {
    pub fn image(&self) -> Result<&DockerImage, Error> {
        self.images.first().ok_or_else(|| {
            Error::invalid_topology(format!("no docker image configured for chain {}", self.name))
        })
    }
}

impl ChainSpec {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            chain_config: None,
        }
    }

    pub fn with_chain_config(mut self, chain_config: ChainConfig) -> Self {
        self.chain_config = Some(chain_config);
        self
    }

    /**
       Resolve the spec into a full [`ChainConfig`]. A config given in the
       spec takes precedence over the built-in one, and the version
       overrides the version of the first image.
    */
    pub fn resolve(&self) -> Result<ChainConfig, Error> {
        let mut config = match &self.chain_config {
            Some(config) => config.clone(),
            None => builtin_chain_config(&self.name).ok_or_else(|| {
                Error::invalid_topology(format!(
                    "no built-in chain configuration for chain `{}`",
                    self.name
                ))
            })?,
        };

        if config.name.is_empty() {
            config.name = self.name.clone();
        }

        if !self.version.is_empty() {
            let image = config.images.first_mut().ok_or_else(|| {
                Error::invalid_topology(format!(
                    "cannot override version of chain {} without images",
                    self.name
                ))
            })?;

            image.version = self.version.clone();
        }

        Ok(config)
    }
}

/**
   The built-in configurations of the chains known by the framework.
*/
pub fn builtin_chain_config(name: &str) -> Option<ChainConfig> {
    match name {
        "icad" => Some(ChainConfig {
            chain_type: ChainType::Cosmos,
            name: "icad".to_string(),
            chain_id: String::new(),
            bin: "icad".to_string(),
            bech32_prefix: "cosmos".to_string(),
            denom: "photon".to_string(),
            gas_prices: "0.00photon".to_string(),
            gas_adjustment: 1.2,
            trusting_period: "330h".to_string(),
            images: vec![DockerImage::new(
                "ghcr.io/cosmos/ibc-go-icad",
                "v0.5.0",
                "1025:1025",
            )],
            block_time: Duration::from_secs(2),
            genesis_subcommand: false,
        }),
        "gaia" => Some(ChainConfig {
            chain_type: ChainType::Cosmos,
            name: "gaia".to_string(),
            chain_id: String::new(),
            bin: "gaiad".to_string(),
            bech32_prefix: "cosmos".to_string(),
            denom: "uatom".to_string(),
            gas_prices: "0.01uatom".to_string(),
            gas_adjustment: 1.3,
            trusting_period: "504h".to_string(),
            images: vec![DockerImage::new(
                "ghcr.io/strangelove-ventures/heighliner/gaia",
                "v14.1.0",
                "1025:1025",
            )],
            block_time: Duration::from_secs(2),
            genesis_subcommand: true,
        }),
        _ => None,
    }
}
