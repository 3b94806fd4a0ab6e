/*!
   Commands used to initialize the genesis of a chain node.
*/

use eyre::eyre;
use serde_json as json;

use crate::chain::exec::{CommandExecutor, ExecOutput};
use crate::error::{handle_generic_error, Error};
use crate::types::wallet::Wallet;

pub fn initialize(
    executor: &impl CommandExecutor,
    command_path: &str,
    chain_id: &str,
    home_path: &str,
    moniker: &str,
) -> Result<(), Error> {
    executor.exec(&[
        command_path,
        "init",
        moniker,
        "--chain-id",
        chain_id,
        "--home",
        home_path,
    ])?;

    Ok(())
}

/**
   Add a new key to the `test` keyring and return the wallet, including
   its mnemonic.
*/
pub fn add_wallet(
    executor: &impl CommandExecutor,
    command_path: &str,
    home_path: &str,
    key_name: &str,
) -> Result<Wallet, Error> {
    let output = executor.exec(&[
        command_path,
        "keys",
        "add",
        key_name,
        "--keyring-backend",
        "test",
        "--output",
        "json",
        "--home",
        home_path,
    ])?;

    parse_key_output(key_name, &output)
}

/**
   Parse the JSON emitted by `keys add --output json`, which older SDK
   versions print to stderr.
*/
pub fn parse_key_output(key_name: &str, output: &ExecOutput) -> Result<Wallet, Error> {
    let json_val: json::Value =
        json::from_str(output.structured_output()).map_err(handle_generic_error)?;

    let address = json_val
        .get("address")
        .ok_or_else(|| eyre!("expect address string field to be present in json result"))?
        .as_str()
        .ok_or_else(|| eyre!("expect address string field to be present in json result"))?
        .to_string();

    let mnemonic = json_val
        .get("mnemonic")
        .ok_or_else(|| eyre!("expect mnemonic string field to be present in json result"))?
        .as_str()
        .ok_or_else(|| eyre!("expect mnemonic string field to be present in json result"))?
        .to_string();

    Ok(Wallet::new(key_name.to_string(), address, mnemonic))
}

fn genesis_command<'a>(
    command_path: &'a str,
    genesis_subcommand: bool,
    command: &'a str,
) -> Vec<&'a str> {
    if genesis_subcommand {
        vec![command_path, "genesis", command]
    } else {
        vec![command_path, command]
    }
}

pub fn add_genesis_account(
    executor: &impl CommandExecutor,
    command_path: &str,
    home_path: &str,
    genesis_subcommand: bool,
    wallet_address: &str,
    amounts: &[String],
) -> Result<(), Error> {
    let amounts_str = itertools::join(amounts, ",");

    let mut args = genesis_command(command_path, genesis_subcommand, "add-genesis-account");
    args.extend_from_slice(&[wallet_address, &amounts_str, "--home", home_path]);

    executor.exec(&args)?;

    Ok(())
}

pub fn add_genesis_validator(
    executor: &impl CommandExecutor,
    command_path: &str,
    chain_id: &str,
    home_path: &str,
    genesis_subcommand: bool,
    key_name: &str,
    amount: &str,
) -> Result<(), Error> {
    let mut args = genesis_command(command_path, genesis_subcommand, "gentx");
    args.extend_from_slice(&[
        key_name,
        amount,
        "--chain-id",
        chain_id,
        "--keyring-backend",
        "test",
        "--home",
        home_path,
    ]);

    executor.exec(&args)?;

    Ok(())
}

pub fn collect_gen_txs(
    executor: &impl CommandExecutor,
    command_path: &str,
    home_path: &str,
    genesis_subcommand: bool,
) -> Result<(), Error> {
    let mut args = genesis_command(command_path, genesis_subcommand, "collect-gentxs");
    args.extend_from_slice(&["--home", home_path]);

    executor.exec(&args)?;

    Ok(())
}

/// The command that runs the full node in the foreground.
pub fn start_command<'a>(command_path: &'a str, home_path: &'a str) -> Vec<&'a str> {
    vec![command_path, "start", "--home", home_path]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::exec::recording::RecordingExecutor;

    const KEY_JSON: &str = r#"{"name":"faucet","type":"local","address":"cosmos1faucet","pubkey":"{}","mnemonic":"abandon abandon about"}"#;

    #[test]
    fn key_output_is_read_from_stderr() -> Result<(), Error> {
        let output = ExecOutput {
            stdout: String::new(),
            stderr: KEY_JSON.to_string(),
        };

        let wallet = parse_key_output("faucet", &output)?;

        assert_eq!(wallet.key_name, "faucet");
        assert_eq!(wallet.address.as_str(), "cosmos1faucet");
        assert_eq!(wallet.mnemonic, "abandon abandon about");

        Ok(())
    }

    #[test]
    fn key_output_without_mnemonic_is_an_error() {
        let output = ExecOutput {
            stdout: r#"{"name":"faucet","address":"cosmos1faucet"}"#.to_string(),
            stderr: String::new(),
        };

        assert!(parse_key_output("faucet", &output).is_err());
    }

    #[test]
    fn genesis_commands_follow_sdk_layout() -> Result<(), Error> {
        let executor = RecordingExecutor::default();

        add_genesis_account(
            &executor,
            "icad",
            "/home",
            false,
            "cosmos1abc",
            &["100photon".to_string(), "5stake".to_string()],
        )?;
        collect_gen_txs(&executor, "gaiad", "/home", true)?;

        assert_eq!(
            executor.command(0),
            vec!["icad", "add-genesis-account", "cosmos1abc", "100photon,5stake", "--home", "/home"]
        );
        assert_eq!(
            executor.command(1),
            vec!["gaiad", "genesis", "collect-gentxs", "--home", "/home"]
        );

        Ok(())
    }
}
