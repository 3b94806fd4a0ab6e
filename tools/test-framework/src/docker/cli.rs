/*!
   Execution of `docker` subcommands.
*/

use tracing::{debug, info};

use crate::chain::exec::{exec_with_stdin, simple_exec, ExecOutput};
use crate::docker::container::{ContainerSpec, RunMode};
use crate::docker::image::DockerImage;
use crate::error::Error;

/**
   A handle to the `docker` command line.

   This is cheap to clone, and is shared by all the containers, volumes
   and networks of a test.
*/
#[derive(Debug, Clone)]
pub struct Docker {
    /**
       The filesystem path to the docker CLI. Defaults to `docker`.
    */
    pub command_path: String,

    /**
       When set, containers, volumes and networks are left behind when
       their guards are dropped.
    */
    pub keep_resources: bool,
}

impl Docker {
    pub fn new(command_path: &str, keep_resources: bool) -> Self {
        Self {
            command_path: command_path.to_string(),
            keep_resources,
        }
    }

    pub fn run(&self, desc: &str, args: &[&str]) -> Result<ExecOutput, Error> {
        simple_exec(desc, &self.command_path, args)
    }

    pub fn run_with_stdin(
        &self,
        desc: &str,
        args: &[&str],
        stdin: &[u8],
    ) -> Result<ExecOutput, Error> {
        exec_with_stdin(desc, &self.command_path, args, stdin)
    }

    pub fn pull_image(&self, image: &DockerImage) -> Result<(), Error> {
        info!("pulling docker image {}", image);

        self.run("pull image", &["pull", &image.reference()])?;

        Ok(())
    }

    /**
       Run a container to completion and remove it afterwards,
       returning the output of its command.
    */
    pub fn run_oneshot(&self, spec: &ContainerSpec, command: &[&str]) -> Result<ExecOutput, Error> {
        let args = spec.run_args(RunMode::Oneshot, command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        self.run(&spec.image.reference(), &args)
    }

    /**
       Same as [`run_oneshot`](Docker::run_oneshot), with the given bytes
       written to the stdin of the container.
    */
    pub fn run_oneshot_with_stdin(
        &self,
        spec: &ContainerSpec,
        command: &[&str],
        stdin: &[u8],
    ) -> Result<ExecOutput, Error> {
        let args = spec.run_args(RunMode::Interactive, command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        self.run_with_stdin(&spec.image.reference(), &args, stdin)
    }

    /// Run a container in the background, returning its container id.
    pub fn run_detached(&self, spec: &ContainerSpec, command: &[&str]) -> Result<String, Error> {
        let args = spec.run_args(RunMode::Detached, command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let container_id = self.run(&spec.image.reference(), &args)?.stdout;

        Ok(container_id.trim().to_string())
    }

    /// Run a command inside a running container.
    pub fn exec(&self, container_name: &str, command: &[&str]) -> Result<ExecOutput, Error> {
        let mut args = vec!["exec", container_name];
        args.extend_from_slice(command);

        self.run(container_name, &args)
    }

    pub fn stop_container(&self, container_name: &str) -> Result<(), Error> {
        debug!("stopping container {}", container_name);

        self.run(container_name, &["stop", container_name])?;

        Ok(())
    }

    pub fn remove_container(&self, container_name: &str) -> Result<(), Error> {
        debug!("removing container {}", container_name);

        self.run(container_name, &["rm", "--force", "--volumes", container_name])?;

        Ok(())
    }

    pub fn container_logs(&self, container_name: &str) -> Result<ExecOutput, Error> {
        self.run(container_name, &["logs", container_name])
    }

    pub fn create_volume(&self, volume_name: &str) -> Result<(), Error> {
        debug!("creating volume {}", volume_name);

        self.run(volume_name, &["volume", "create", volume_name])?;

        Ok(())
    }

    pub fn remove_volume(&self, volume_name: &str) -> Result<(), Error> {
        debug!("removing volume {}", volume_name);

        self.run(volume_name, &["volume", "rm", "--force", volume_name])?;

        Ok(())
    }

    pub fn create_network(&self, network_name: &str) -> Result<(), Error> {
        debug!("creating network {}", network_name);

        self.run(network_name, &["network", "create", network_name])?;

        Ok(())
    }

    pub fn remove_network(&self, network_name: &str) -> Result<(), Error> {
        debug!("removing network {}", network_name);

        self.run(network_name, &["network", "rm", network_name])?;

        Ok(())
    }
}
