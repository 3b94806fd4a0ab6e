/*!
    Helper functions for modifying the chain node config in TOML.

    Since we do not need to understand the full structure of the
    CosmosSDK config, we are updating the config as dynamic TOML
    values instead of serializing them into proper types.
*/

use core::time::Duration;
use eyre::{eyre, Report as Error};
use toml::Value;

/// Set the `rpc.laddr` field in the full node config, listening on all interfaces.
pub fn set_rpc_port(config: &mut Value, port: u16) -> Result<(), Error> {
    config
        .get_mut("rpc")
        .ok_or_else(|| eyre!("expect rpc section"))?
        .as_table_mut()
        .ok_or_else(|| eyre!("expect object"))?
        .insert(
            "laddr".to_string(),
            format!("tcp://0.0.0.0:{}", port).into(),
        );

    Ok(())
}

/// Set the `p2p.allow_duplicate_ip` field, needed when all nodes share a docker host.
pub fn set_allow_duplicate_ip(config: &mut Value, allow: bool) -> Result<(), Error> {
    config
        .get_mut("p2p")
        .ok_or_else(|| eyre!("expect p2p section"))?
        .as_table_mut()
        .ok_or_else(|| eyre!("expect object"))?
        .insert("allow_duplicate_ip".to_string(), allow.into());

    Ok(())
}

/// Set the `consensus.timeout_commit` field in the full node config.
pub fn set_timeout_commit(config: &mut Value, duration: Duration) -> Result<(), Error> {
    config
        .get_mut("consensus")
        .ok_or_else(|| eyre!("expect consensus section"))?
        .as_table_mut()
        .ok_or_else(|| eyre!("expect object"))?
        .insert(
            "timeout_commit".to_string(),
            format!("{}ms", duration.as_millis()).into(),
        );

    Ok(())
}

/// Set the `consensus.timeout_propose` field in the full node config.
pub fn set_timeout_propose(config: &mut Value, duration: Duration) -> Result<(), Error> {
    config
        .get_mut("consensus")
        .ok_or_else(|| eyre!("expect consensus section"))?
        .as_table_mut()
        .ok_or_else(|| eyre!("expect object"))?
        .insert(
            "timeout_propose".to_string(),
            format!("{}ms", duration.as_millis()).into(),
        );

    Ok(())
}

/// Set the `minimum-gas-prices` field in the app config.
pub fn set_minimum_gas_price(config: &mut Value, price: &str) -> Result<(), Error> {
    config
        .as_table_mut()
        .ok_or_else(|| eyre!("expect object"))?
        .insert("minimum-gas-prices".to_string(), price.into());

    Ok(())
}

pub fn disable_api(config: &mut Value) -> Result<(), Error> {
    if let Some(field) = config.get_mut("api") {
        field
            .as_table_mut()
            .ok_or_else(|| eyre!("expect object"))?
            .insert("enable".to_string(), false.into());
    }

    Ok(())
}

/**
   Replace the default `stake` denomination of a freshly initialized
   genesis file with the chain denomination, in every module that
   references it. Modules missing from the genesis are skipped.
*/
pub fn set_staking_denom(genesis: &mut serde_json::Value, denom: &str) -> Result<(), Error> {
    let app_state = genesis
        .get_mut("app_state")
        .and_then(|app_state| app_state.as_object_mut())
        .ok_or_else(|| eyre!("expect app_state object in genesis file"))?;

    let denom_value = serde_json::Value::String(denom.to_string());

    if let Some(params) = app_state
        .get_mut("staking")
        .and_then(|staking| staking.get_mut("params"))
        .and_then(|params| params.as_object_mut())
    {
        params.insert("bond_denom".to_string(), denom_value.clone());
    }

    if let Some(params) = app_state
        .get_mut("mint")
        .and_then(|mint| mint.get_mut("params"))
        .and_then(|params| params.as_object_mut())
    {
        params.insert("mint_denom".to_string(), denom_value.clone());
    }

    if let Some(constant_fee) = app_state
        .get_mut("crisis")
        .and_then(|crisis| crisis.get_mut("constant_fee"))
        .and_then(|fee| fee.as_object_mut())
    {
        constant_fee.insert("denom".to_string(), denom_value.clone());
    }

    if let Some(gov) = app_state.get_mut("gov") {
        for params_key in ["deposit_params", "params"] {
            if let Some(min_deposit) = gov
                .get_mut(params_key)
                .and_then(|params| params.get_mut("min_deposit"))
                .and_then(|deposit| deposit.as_array_mut())
            {
                for coin in min_deposit.iter_mut().filter_map(|c| c.as_object_mut()) {
                    coin.insert("denom".to_string(), denom_value.clone());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NODE_CONFIG: &str = r#"
log_level = "info"

[rpc]
laddr = "tcp://127.0.0.1:26657"

[p2p]
laddr = "tcp://0.0.0.0:26656"
allow_duplicate_ip = false

[consensus]
timeout_propose = "3s"
timeout_commit = "5s"
"#;

    #[test]
    fn node_config_is_updated() -> Result<(), Error> {
        let mut config: Value = toml::from_str(NODE_CONFIG)?;

        set_rpc_port(&mut config, 26657)?;
        set_allow_duplicate_ip(&mut config, true)?;
        set_timeout_commit(&mut config, Duration::from_secs(2))?;
        set_timeout_propose(&mut config, Duration::from_millis(500))?;

        assert_eq!(config["rpc"]["laddr"].as_str(), Some("tcp://0.0.0.0:26657"));
        assert_eq!(config["p2p"]["allow_duplicate_ip"].as_bool(), Some(true));
        assert_eq!(config["consensus"]["timeout_commit"].as_str(), Some("2000ms"));
        assert_eq!(config["consensus"]["timeout_propose"].as_str(), Some("500ms"));

        Ok(())
    }

    #[test]
    fn missing_section_is_an_error() -> Result<(), Error> {
        let mut config: Value = toml::from_str("log_level = \"info\"")?;

        assert!(set_rpc_port(&mut config, 26657).is_err());

        Ok(())
    }

    #[test]
    fn app_config_is_updated() -> Result<(), Error> {
        let mut config: Value = toml::from_str("minimum-gas-prices = \"\"\n[api]\nenable = true\n")?;

        set_minimum_gas_price(&mut config, "0.00photon")?;
        disable_api(&mut config)?;

        assert_eq!(config["minimum-gas-prices"].as_str(), Some("0.00photon"));
        assert_eq!(config["api"]["enable"].as_bool(), Some(false));

        Ok(())
    }

    #[test]
    fn staking_denom_is_replaced() -> Result<(), Error> {
        let mut genesis = json!({
            "app_state": {
                "staking": { "params": { "bond_denom": "stake" } },
                "mint": { "params": { "mint_denom": "stake" } },
                "crisis": { "constant_fee": { "denom": "stake", "amount": "1000" } },
                "gov": {
                    "deposit_params": {
                        "min_deposit": [{ "denom": "stake", "amount": "10000000" }]
                    }
                }
            }
        });

        set_staking_denom(&mut genesis, "photon")?;

        let app_state = &genesis["app_state"];
        assert_eq!(app_state["staking"]["params"]["bond_denom"], "photon");
        assert_eq!(app_state["mint"]["params"]["mint_denom"], "photon");
        assert_eq!(app_state["crisis"]["constant_fee"]["denom"], "photon");
        assert_eq!(
            app_state["gov"]["deposit_params"]["min_deposit"][0]["denom"],
            "photon"
        );

        Ok(())
    }
}
