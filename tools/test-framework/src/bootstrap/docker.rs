/*!
   Provisioning of the docker resources shared by all containers of a
   test.
*/

use tracing::debug;

use crate::docker::DockerNetwork;
use crate::error::Error;
use crate::types::config::TestConfig;

/**
   Check that the docker daemon is reachable, and create the network
   that the chains and relayers of the test join.

   The network is removed when the returned value is dropped, so it must
   outlive every chain and relayer of the test.
*/
pub fn docker_setup(config: &TestConfig) -> Result<DockerNetwork, Error> {
    let docker = config.docker();

    let version = docker.run(
        "docker server version",
        &["version", "--format", "{{.Server.Version}}"],
    )?;

    debug!("using docker server version {}", version.stdout.trim());

    DockerNetwork::create(&docker, &network_name(config))
}

pub fn network_name(config: &TestConfig) -> String {
    format!("ibc-test-{}", config.test_id)
}
