/*!
   Construction of the relayer of a test.
*/

use tracing::info;

use crate::docker::{DockerImage, DockerNetwork};
use crate::error::Error;
use crate::relayer::driver::RelayerDriver;
use crate::relayer::options::{RelayerOptions, RelayerSettings};
use crate::types::config::TestConfig;

pub const RLY_DEFAULT_REPOSITORY: &str = "ghcr.io/cosmos/relayer";
pub const RLY_DEFAULT_VERSION: &str = "v2.3.1";
pub const RLY_DEFAULT_UID_GID: &str = "100:1000";

/// The relayer implementations that can be run in a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayerType {
    /// The Go relayer `rly`.
    CosmosRly,
}

impl RelayerType {
    pub fn default_image(&self) -> DockerImage {
        match self {
            Self::CosmosRly => DockerImage::new(
                RLY_DEFAULT_REPOSITORY,
                RLY_DEFAULT_VERSION,
                RLY_DEFAULT_UID_GID,
            ),
        }
    }

    pub fn bin(&self) -> &'static str {
        match self {
            Self::CosmosRly => "rly",
        }
    }

    pub fn home_dir(&self) -> &'static str {
        match self {
            Self::CosmosRly => "/home/relayer",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CosmosRly => "rly",
        }
    }
}

pub struct RelayerFactory {
    relayer_type: RelayerType,
    options: RelayerOptions,
}

impl RelayerFactory {
    pub fn new(relayer_type: RelayerType, options: RelayerOptions) -> Self {
        Self {
            relayer_type,
            options,
        }
    }

    /// The settings the relayer is built with.
    pub fn settings(&self) -> RelayerSettings {
        RelayerSettings::from_options(self.relayer_type.default_image(), &self.options)
    }

    /**
       Build a relayer attached to the docker network of the test.

       The relayer image is only pulled when both the relayer options and
       the test configuration allow it.
    */
    pub fn build(self, config: &TestConfig, network: &DockerNetwork) -> Result<RelayerDriver, Error> {
        let mut settings = self.settings();
        settings.pull_image = settings.pull_image && config.pull_images;

        let container_name = format!("{}-{}", self.relayer_type.name(), config.test_id);

        info!(
            "building relayer {} from image {}",
            container_name, settings.image
        );

        RelayerDriver::new(
            self.relayer_type,
            settings,
            config.docker(),
            container_name.clone(),
            network.name().to_string(),
            config.chain_store_dir.join(format!("{}.log", container_name)),
        )
    }
}
