/*!
   Export of the running topology of a test as environment variables.

   The variables are written to `.env` files in the test directory, so
   that the chains and relayer of a test run with `KEEP_CONTAINERS=1` can
   be inspected from a terminal after `source`-ing the file:

   ```bash
   source data/test-1234/interchain.env
   docker exec $CHAIN_1_CONTAINER $CHAIN_1_CMD status --node $CHAIN_1_RPC_ADDR
   ```
*/

use core::convert::AsRef;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fs::write;
use std::path::Path;
use tracing::debug;

use crate::error::Error;

/**
   Implemented by the parts of a test topology that have something to
   export, such as chain nodes, wallets and relayers.
*/
pub trait ExportEnv {
    fn export_env(&self, writer: &mut impl EnvWriter);
}

/**
   A sink for exported variables. A key written twice keeps the last value.
*/
pub trait EnvWriter {
    fn write_env(&mut self, key: &str, value: &str);
}

/**
   Wrap a writer so that every key is written as `<prefix>_<key>`, with
   the prefix normalized by [`env_key`].
*/
pub fn prefix_writer<'a, Writer: EnvWriter>(
    prefix: &str,
    writer: &'a mut Writer,
) -> impl EnvWriter + 'a {
    PrefixEnvWriter {
        prefix: env_key(prefix),
        writer,
    }
}

pub struct PrefixEnvWriter<'a, Writer> {
    prefix: String,
    writer: &'a mut Writer,
}

impl<'a, Writer: EnvWriter> EnvWriter for PrefixEnvWriter<'a, Writer> {
    fn write_env(&mut self, key: &str, value: &str) {
        self.writer
            .write_env(&format!("{}_{}", self.prefix, key), value);
    }
}

impl EnvWriter for BTreeMap<String, String> {
    fn write_env(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/**
   Turn a name such as a key name or a relayer name into a valid
   variable name: uppercase, with every other character than ASCII
   letters and digits replaced by `_`.
*/
pub fn env_key(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/**
   Format the exported variables as sorted `KEY=VALUE` lines. Values with
   whitespace or quotes are single-quoted for the shell.
*/
pub fn format_env(exporter: &impl ExportEnv) -> String {
    let mut envs = BTreeMap::new();
    exporter.export_env(&mut envs);

    envs.iter()
        .map(|(key, value)| format!("{}={}", key, quote_value(value)))
        .join("\n")
}

fn quote_value(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", value.replace('\'', r"'\''"))
    } else {
        value.to_string()
    }
}

/**
   Save the exported variables as a `.env` file at the given path.
*/
pub fn write_env(path: impl AsRef<Path>, exporter: &impl ExportEnv) -> Result<(), Error> {
    write(path.as_ref(), format_env(exporter))?;

    debug!("written environment to {}", path.as_ref().display());

    Ok(())
}
