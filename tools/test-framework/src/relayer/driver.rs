/*!
   Driver for the Go relayer running in docker.
*/

use eyre::eyre;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info};

use crate::chain::exec::ExecOutput;
use crate::chain::node::ChainNode;
use crate::docker::{Container, ContainerSpec, Docker, Volume};
use crate::error::Error;
use crate::relayer::config::RelayerChainFile;
use crate::relayer::factory::RelayerType;
use crate::relayer::options::RelayerSettings;
use crate::relayer::output::{parse_json_lines, ChannelOutput, ConnectionOutput};
use crate::types::env::{EnvWriter, ExportEnv};
use crate::types::wallet::Wallet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientOptions {
    /// E.g. `330h`. Left to the relayer default when empty.
    pub trusting_period: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOptions {
    pub source_port: String,
    pub destination_port: String,
    pub order: String,
    pub version: String,
}

impl Default for ChannelOptions {
    /// An unordered ICS-20 `transfer` channel.
    fn default() -> Self {
        Self {
            source_port: "transfer".to_string(),
            destination_port: "transfer".to_string(),
            order: "unordered".to_string(),
            version: "ics20-1".to_string(),
        }
    }
}

/**
   Controls a relayer of a test. Every command runs in a one-shot container
   sharing the relayer home volume, except [`start_relayer`](Self::start_relayer)
   which runs the relayer in a background container until
   [`stop_relayer`](Self::stop_relayer) is called.
*/
pub struct RelayerDriver {
    // Declared before the volume so that the container is removed first.
    container: RwLock<Option<Container>>,

    volume: Volume,

    pub relayer_type: RelayerType,

    pub settings: RelayerSettings,

    /// The name of the relayer container and of its home volume.
    pub container_name: String,

    pub network: String,

    pub log_file: PathBuf,

    docker: Docker,
}

impl RelayerDriver {
    pub fn new(
        relayer_type: RelayerType,
        settings: RelayerSettings,
        docker: Docker,
        container_name: String,
        network: String,
        log_file: PathBuf,
    ) -> Result<Self, Error> {
        let volume = Volume::create(&docker, &container_name)?;

        Ok(Self {
            container: RwLock::new(None),
            volume,
            relayer_type,
            settings,
            container_name,
            network,
            log_file,
            docker,
        })
    }

    pub fn home_dir(&self) -> &'static str {
        self.relayer_type.home_dir()
    }

    fn container_spec(&self) -> ContainerSpec {
        ContainerSpec::new(&self.settings.image)
            .with_network(&self.network)
            .with_volume(self.volume.name(), self.home_dir())
    }

    /// The relayer command line, with the home directory flag appended.
    fn command<'a>(&'a self, args: &[&'a str]) -> Vec<&'a str> {
        let mut command = vec![self.relayer_type.bin()];
        command.extend_from_slice(args);
        command.extend_from_slice(&["--home", self.home_dir()]);
        command
    }

    /**
       Run a relayer command in a one-shot container.
    */
    pub fn exec(&self, args: &[&str]) -> Result<ExecOutput, Error> {
        let command = self.command(args);

        debug!("running relayer command: {}", itertools::join(&command, " "));

        self.docker.run_oneshot(&self.container_spec(), &command)
    }

    /// Pull the relayer image, unless disabled by the relayer options.
    pub fn pull_image(&self) -> Result<(), Error> {
        if self.settings.pull_image {
            self.docker.pull_image(&self.settings.image)?;
        }

        Ok(())
    }

    /// Initialize the relayer configuration in the home volume.
    pub fn setup(&self) -> Result<(), Error> {
        self.volume.set_owner(&self.settings.image.uid_gid)?;

        self.exec(&["config", "init"])?;

        info!("initialized relayer {}", self.container_name);

        Ok(())
    }

    /**
       Add a chain to the relayer configuration, and restore the relayer
       key of the chain from the mnemonic of the given wallet.
    */
    pub fn add_chain(&self, chain: &ChainNode, wallet: &Wallet) -> Result<(), Error> {
        let chain_id = chain.chain_id();

        let chain_file = RelayerChainFile::for_chain(chain, wallet.key_name());
        let file_name = format!("{}.json", chain_id);

        self.volume
            .write_file(&file_name, &serde_json::to_vec_pretty(&chain_file)?)?;
        self.volume.set_owner(&self.settings.image.uid_gid)?;

        let file_path = format!("{}/{}", self.home_dir(), file_name);

        self.exec(&["chains", "add", "--file", &file_path, chain_id])?;

        self.exec(&["keys", "restore", chain_id, wallet.key_name(), &wallet.mnemonic])?;

        info!(
            "added chain {} to relayer {} with key {}",
            chain_id,
            self.container_name,
            wallet.key_name()
        );

        Ok(())
    }

    pub fn generate_path(
        &self,
        src_chain_id: &str,
        dst_chain_id: &str,
        path_name: &str,
    ) -> Result<(), Error> {
        self.exec(&["paths", "new", src_chain_id, dst_chain_id, path_name])?;

        Ok(())
    }

    pub fn create_clients(&self, path_name: &str, options: &CreateClientOptions) -> Result<(), Error> {
        let mut args = vec!["tx", "clients", path_name];

        if !options.trusting_period.is_empty() {
            args.extend_from_slice(&["--client-tp", &options.trusting_period]);
        }

        self.exec(&args)?;

        info!("created clients on path {}", path_name);

        Ok(())
    }

    pub fn create_connections(&self, path_name: &str) -> Result<(), Error> {
        self.exec(&["tx", "connection", path_name])?;

        info!("created connection on path {}", path_name);

        Ok(())
    }

    pub fn create_channel(&self, path_name: &str, options: &ChannelOptions) -> Result<(), Error> {
        self.exec(&[
            "tx",
            "channel",
            path_name,
            "--src-port",
            &options.source_port,
            "--dst-port",
            &options.destination_port,
            "--order",
            &options.order,
            "--version",
            &options.version,
        ])?;

        info!(
            "created channel {}/{} on path {}",
            options.source_port, options.destination_port, path_name
        );

        Ok(())
    }

    pub fn get_connections(&self, chain_id: &str) -> Result<Vec<ConnectionOutput>, Error> {
        let output = self.exec(&["q", "connections", chain_id])?;

        parse_json_lines(&output.stdout)
    }

    pub fn get_channels(&self, chain_id: &str) -> Result<Vec<ChannelOutput>, Error> {
        let output = self.exec(&["q", "channels", chain_id])?;

        parse_json_lines(&output.stdout)
    }

    pub fn is_running(&self) -> Result<bool, Error> {
        let container = self.container.read().map_err(|_| eyre!("poisoned lock"))?;

        Ok(container.is_some())
    }

    /**
       Start relaying on the given path in a background container. The
       extra start flags of the relayer options are appended to the
       command.
    */
    pub fn start_relayer(&self, path_name: &str) -> Result<(), Error> {
        let mut container = self.container.write().map_err(|_| eyre!("poisoned lock"))?;

        if container.is_some() {
            return Err(Error::generic(eyre!(
                "relayer {} is already running, it must be stopped before starting again",
                self.container_name
            )));
        }

        let mut args = vec!["start", path_name];
        args.extend(self.settings.extra_start_flags.iter().map(String::as_str));

        let spec = self.container_spec().with_name(&self.container_name);

        let started =
            Container::start(&self.docker, &spec, &self.command(&args))?.with_log_file(&self.log_file);

        *container = Some(started);

        info!("started relayer {} on path {}", self.container_name, path_name);

        Ok(())
    }

    /**
       Stop the background relayer container. Stopping a relayer that is
       not running succeeds without doing anything.
    */
    pub fn stop_relayer(&self) -> Result<(), Error> {
        let container = self
            .container
            .write()
            .map_err(|_| eyre!("poisoned lock"))?
            .take();

        if let Some(mut container) = container {
            container.stop()?;
            info!("stopped relayer {}", self.container_name);
        }

        Ok(())
    }
}

impl ExportEnv for RelayerDriver {
    fn export_env(&self, writer: &mut impl EnvWriter) {
        writer.write_env("RELAYER_CONTAINER", &self.container_name);
        writer.write_env("RELAYER_HOME", self.home_dir());
        writer.write_env("RELAYER_IMAGE", &self.settings.image.reference());
        writer.write_env("RELAYER_VOLUME", self.volume.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channel_is_transfer() {
        let options = ChannelOptions::default();

        assert_eq!(options.source_port, "transfer");
        assert_eq!(options.destination_port, "transfer");
        assert_eq!(options.order, "unordered");
        assert_eq!(options.version, "ics20-1");
    }
}
