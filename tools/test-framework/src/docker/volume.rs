/*!
   Docker volumes holding the home directories of chain nodes and
   relayers.

   Files in a volume are read and written through short-lived
   [`BUSYBOX_IMAGE`] containers, so that the test does not depend on the
   tools shipped in the chain or relayer images, nor on the volume being
   reachable from the host filesystem.
*/

use tracing::warn;

use crate::docker::cli::Docker;
use crate::docker::container::ContainerSpec;
use crate::docker::image::DockerImage;
use crate::error::Error;

pub const BUSYBOX_REPOSITORY: &str = "busybox";

pub const BUSYBOX_VERSION: &str = "stable";

const MOUNT_PATH: &str = "/mnt/dockervolume";

pub fn busybox_image() -> DockerImage {
    DockerImage::new(BUSYBOX_REPOSITORY, BUSYBOX_VERSION, "")
}

/**
   A named docker volume that is removed when dropped.
*/
#[derive(Debug)]
pub struct Volume {
    docker: Docker,
    name: String,
}

impl Volume {
    pub fn create(docker: &Docker, name: &str) -> Result<Self, Error> {
        docker.create_volume(name)?;

        Ok(Self {
            docker: docker.clone(),
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn busybox(&self) -> ContainerSpec {
        ContainerSpec::new(&busybox_image())
            .with_volume(&self.name, MOUNT_PATH)
            .with_user("0:0")
    }

    /**
       Change the owner of everything in the volume, so that images
       running as a non-root user can write to it.
    */
    pub fn set_owner(&self, uid_gid: &str) -> Result<(), Error> {
        if uid_gid.is_empty() {
            return Ok(());
        }

        self.docker
            .run_oneshot(&self.busybox(), &["chown", "-R", uid_gid, MOUNT_PATH])?;

        Ok(())
    }

    /// Read a file, given by its path relative to the volume root.
    pub fn read_file(&self, relative_path: &str) -> Result<Vec<u8>, Error> {
        let path = volume_path(relative_path);

        let output = self.docker.run_oneshot(&self.busybox(), &["cat", &path])?;

        Ok(output.stdout.into_bytes())
    }

    /**
       Write a file, given by its path relative to the volume root,
       creating its parent directories as needed.
    */
    pub fn write_file(&self, relative_path: &str, content: &[u8]) -> Result<(), Error> {
        let path = volume_path(relative_path);
        let script = format!("mkdir -p \"$(dirname '{path}')\" && cat > '{path}'");

        self.docker
            .run_oneshot_with_stdin(&self.busybox(), &["sh", "-c", &script], content)?;

        Ok(())
    }
}

impl Drop for Volume {
    fn drop(&mut self) {
        if self.docker.keep_resources {
            return;
        }

        if let Err(e) = self.docker.remove_volume(&self.name) {
            warn!("failed to remove volume {}: {}", self.name, e);
        }
    }
}

fn volume_path(relative_path: &str) -> String {
    format!("{}/{}", MOUNT_PATH, relative_path.trim_start_matches('/'))
}
