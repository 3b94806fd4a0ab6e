use tracing::{info, warn};

use crate::docker::cli::Docker;
use crate::error::Error;

/**
   The docker network that all containers of a test are attached to.

   Containers reach each other through their container names as
   hostnames on this network. The network is removed when dropped,
   which must happen after every container on it has been removed.
*/
#[derive(Debug)]
pub struct DockerNetwork {
    docker: Docker,
    name: String,
}

impl DockerNetwork {
    pub fn create(docker: &Docker, name: &str) -> Result<Self, Error> {
        docker.create_network(name)?;

        info!("created docker network {}", name);

        Ok(Self {
            docker: docker.clone(),
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn docker(&self) -> &Docker {
        &self.docker
    }
}

impl Drop for DockerNetwork {
    fn drop(&mut self) {
        if self.docker.keep_resources {
            return;
        }

        if let Err(e) = self.docker.remove_network(&self.name) {
            warn!("failed to remove docker network {}: {}", self.name, e);
        }
    }
}
