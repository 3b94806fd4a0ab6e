use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::docker::cli::Docker;
use crate::docker::image::DockerImage;
use crate::error::Error;
use crate::util::file::append_to_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run to completion and remove the container afterwards.
    Oneshot,
    /// Same as `Oneshot`, with stdin attached.
    Interactive,
    /// Run in the background.
    Detached,
}

/**
   How a container should be created: which image, which network it
   joins and which volumes are mounted.

   The image entrypoint is always cleared, so the command passed to
   [`run_args`](ContainerSpec::run_args) must start with the binary
   to execute.
*/
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub image: DockerImage,

    pub name: Option<String>,

    pub network: Option<String>,

    /// `(volume name, mount path)` pairs.
    pub volumes: Vec<(String, String)>,

    /// Overrides the user of the image when set.
    pub user: Option<String>,
}

impl ContainerSpec {
    pub fn new(image: &DockerImage) -> Self {
        Self {
            image: image.clone(),
            name: None,
            network: None,
            volumes: Vec::new(),
            user: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_network(mut self, network: &str) -> Self {
        self.network = Some(network.to_string());
        self
    }

    pub fn with_volume(mut self, volume: &str, mount_path: &str) -> Self {
        self.volumes
            .push((volume.to_string(), mount_path.to_string()));
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /**
       Build the arguments to `docker` that run the given command in a
       container created from this spec.
    */
    pub fn run_args(&self, mode: RunMode, command: &[&str]) -> Vec<String> {
        let mut args = vec!["run".to_string()];

        match mode {
            RunMode::Oneshot => args.push("--rm".to_string()),
            RunMode::Interactive => {
                args.push("--rm".to_string());
                args.push("--interactive".to_string());
            }
            RunMode::Detached => args.push("--detach".to_string()),
        }

        if let Some(name) = &self.name {
            args.push("--name".to_string());
            args.push(name.clone());
            args.push("--hostname".to_string());
            args.push(name.clone());
        }

        if let Some(network) = &self.network {
            args.push("--network".to_string());
            args.push(network.clone());
        }

        for (volume, mount_path) in &self.volumes {
            args.push("--volume".to_string());
            args.push(format!("{volume}:{mount_path}"));
        }

        if let Some(user) = self.user.as_deref().or_else(|| self.image.user()) {
            args.push("--user".to_string());
            args.push(user.to_string());
        }

        args.push("--entrypoint=".to_string());
        args.push(self.image.reference());
        args.extend(command.iter().map(|arg| arg.to_string()));

        args
    }
}

/**
   A lightweight guard around a container running in the background,
   ensuring that the container is removed when the guard is dropped.
*/
#[derive(Debug)]
pub struct Container {
    docker: Docker,
    name: String,
    log_file: Option<PathBuf>,
    removed: bool,
}

impl Container {
    /// Start a detached container from the given spec, which must be named.
    pub fn start(docker: &Docker, spec: &ContainerSpec, command: &[&str]) -> Result<Self, Error> {
        let name = spec
            .name
            .clone()
            .ok_or_else(|| Error::invalid_topology("long running containers must be named".into()))?;

        let container_id = docker.run_detached(spec, command)?;

        debug!("started container {} with id {}", name, container_id);

        Ok(Self {
            docker: docker.clone(),
            name,
            log_file: None,
            removed: false,
        })
    }

    /**
       Save the output of the container to the given file before the
       container is removed.
    */
    pub fn with_log_file(mut self, path: &Path) -> Self {
        self.log_file = Some(path.to_path_buf());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn save_logs(&self) {
        let Some(log_file) = &self.log_file else {
            return;
        };

        let res = self.docker.container_logs(&self.name).and_then(|logs| {
            append_to_file(log_file, logs.stdout.as_bytes())?;
            append_to_file(log_file, logs.stderr.as_bytes())
        });

        if let Err(e) = res {
            warn!("failed to save logs of container {}: {}", self.name, e);
        }
    }

    pub fn exec(&self, command: &[&str]) -> Result<crate::chain::exec::ExecOutput, Error> {
        self.docker.exec(&self.name, command)
    }

    /// Stop and remove the container.
    pub fn stop(&mut self) -> Result<(), Error> {
        if self.removed {
            return Ok(());
        }

        self.docker.stop_container(&self.name)?;
        self.save_logs();
        self.docker.remove_container(&self.name)?;
        self.removed = true;

        Ok(())
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        if self.removed || self.docker.keep_resources {
            return;
        }

        self.save_logs();

        if let Err(e) = self.docker.remove_container(&self.name) {
            warn!("failed to remove container {}: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oneshot_args_clear_entrypoint() {
        let image = DockerImage::new("ghcr.io/cosmos/ibc-go-icad", "v0.3.5", "1025:1025");
        let spec = ContainerSpec::new(&image)
            .with_network("net-1")
            .with_volume("vol-1", "/var/cosmos-chain/icad");

        let args = spec.run_args(RunMode::Oneshot, &["icad", "version"]);

        assert_eq!(
            args,
            vec![
                "run",
                "--rm",
                "--network",
                "net-1",
                "--volume",
                "vol-1:/var/cosmos-chain/icad",
                "--user",
                "1025:1025",
                "--entrypoint=",
                "ghcr.io/cosmos/ibc-go-icad:v0.3.5",
                "icad",
                "version",
            ]
        );
    }

    #[test]
    fn detached_args_name_the_host() {
        let image = DockerImage::new("busybox", "stable", "");
        let spec = ContainerSpec::new(&image)
            .with_name("node-0")
            .with_user("0:0");

        let args = spec.run_args(RunMode::Detached, &["sleep", "10"]);

        assert_eq!(
            args,
            vec![
                "run",
                "--detach",
                "--name",
                "node-0",
                "--hostname",
                "node-0",
                "--user",
                "0:0",
                "--entrypoint=",
                "busybox:stable",
                "sleep",
                "10",
            ]
        );
    }

    #[test]
    fn interactive_args_attach_stdin() {
        let image = DockerImage::new("busybox", "stable", "");
        let args = ContainerSpec::new(&image).run_args(RunMode::Interactive, &["cat"]);

        assert_eq!(&args[..3], &["run", "--rm", "--interactive"]);
    }
}
