/*!
   The chain configuration files imported into the Go relayer with
   `rly chains add --file`.
*/

use serde::{Deserialize, Serialize};

use crate::chain::node::ChainNode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayerChainFile {
    #[serde(rename = "type")]
    pub chain_type: String,

    pub value: RelayerChainConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RelayerChainConfig {
    pub key: String,

    pub chain_id: String,

    pub rpc_addr: String,

    pub account_prefix: String,

    pub keyring_backend: String,

    pub gas_adjustment: f64,

    pub gas_prices: String,

    pub debug: bool,

    pub timeout: String,

    pub output_format: String,

    pub sign_mode: String,
}

impl RelayerChainFile {
    /// The chain file for a node, signing with the relayer key `key_name`.
    pub fn for_chain(chain: &ChainNode, key_name: &str) -> Self {
        let config = chain.config();

        Self {
            chain_type: config.chain_type.relayer_chain_type().to_string(),
            value: RelayerChainConfig {
                key: key_name.to_string(),
                chain_id: config.chain_id.clone(),
                rpc_addr: chain.http_rpc_address(),
                account_prefix: config.bech32_prefix.clone(),
                keyring_backend: "test".to_string(),
                gas_adjustment: config.gas_adjustment,
                gas_prices: config.gas_prices.clone(),
                debug: true,
                timeout: "10s".to_string(),
                output_format: "json".to_string(),
                sign_mode: "direct".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::chain::spec::ChainSpec;
    use crate::docker::Docker;
    use crate::error::Error;

    #[test]
    fn chain_file_uses_relayer_field_names() -> Result<(), Error> {
        let mut config = ChainSpec::new("icad", "v0.3.5").resolve()?;
        config.chain_id = "icad-1".to_string();

        let chain = ChainNode::new(
            config,
            "ica-1-icad-1-val-0".to_string(),
            Docker::new("docker", false),
            PathBuf::from("data"),
        );

        let value = serde_json::to_value(RelayerChainFile::for_chain(&chain, "relayer-icad-1"))?;

        assert_eq!(value["type"], "cosmos");
        assert_eq!(value["value"]["chain-id"], "icad-1");
        assert_eq!(value["value"]["key"], "relayer-icad-1");
        assert_eq!(value["value"]["rpc-addr"], "http://ica-1-icad-1-val-0:26657");
        assert_eq!(value["value"]["account-prefix"], "cosmos");
        assert_eq!(value["value"]["gas-prices"], "0.00photon");

        Ok(())
    }
}
