use core::str::FromStr;
use eyre::eyre;
use serde_json as json;

use crate::chain::exec::{CommandExecutor, ExecOutput};
use crate::error::{handle_generic_error, Error};

pub fn query_balance(
    executor: &impl CommandExecutor,
    command_path: &str,
    rpc_listen_address: &str,
    wallet_id: &str,
    denom: &str,
) -> Result<u128, Error> {
    let res = executor
        .exec(&[
            command_path,
            "query",
            "bank",
            "balances",
            wallet_id,
            "--denom",
            denom,
            "--node",
            rpc_listen_address,
            "--output",
            "json",
        ])?
        .stdout;

    parse_balance(&res)
}

/**
   Parse the output of `query bank balances --denom`, which is either a
   bare coin (`{"denom":"photon","amount":"100"}`) or, on newer SDKs,
   a coin wrapped in a `balance` field.
*/
pub fn parse_balance(res: &str) -> Result<u128, Error> {
    let json_res = json::from_str::<json::Value>(res.trim()).map_err(handle_generic_error)?;

    let coin = json_res.get("balance").unwrap_or(&json_res);

    let amount_str = coin
        .get("amount")
        .ok_or_else(|| eyre!("expected amount field"))?
        .as_str()
        .ok_or_else(|| eyre!("expected string field"))?;

    let amount = u128::from_str(amount_str).map_err(handle_generic_error)?;

    Ok(amount)
}

/**
   Query the latest block height of the chain through `<bin> status`.
*/
pub fn query_latest_height(
    executor: &impl CommandExecutor,
    command_path: &str,
    rpc_listen_address: &str,
) -> Result<u64, Error> {
    let output = executor.exec(&[command_path, "status", "--node", rpc_listen_address])?;

    parse_latest_height(&output)
}

/**
   Older Cosmos SDK versions print the status to stderr and name the
   sync info field `SyncInfo`, newer ones use stdout and `sync_info`.
*/
pub fn parse_latest_height(output: &ExecOutput) -> Result<u64, Error> {
    let json_res = json::from_str::<json::Value>(output.structured_output())
        .map_err(handle_generic_error)?;

    let height_str = json_res
        .get("SyncInfo")
        .or_else(|| json_res.get("sync_info"))
        .ok_or_else(|| eyre!("expected sync info field"))?
        .get("latest_block_height")
        .ok_or_else(|| eyre!("expected latest_block_height field"))?
        .as_str()
        .ok_or_else(|| eyre!("expected string field"))?;

    let height = u64::from_str(height_str).map_err(handle_generic_error)?;

    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::exec::recording::RecordingExecutor;

    #[test]
    fn parses_bare_coin() -> Result<(), Error> {
        assert_eq!(parse_balance(r#"{"denom":"photon","amount":"10000000000"}"#)?, 10_000_000_000);
        Ok(())
    }

    #[test]
    fn parses_wrapped_coin() -> Result<(), Error> {
        assert_eq!(
            parse_balance(r#"{"balance":{"denom":"photon","amount":"42"}}"#)?,
            42
        );
        Ok(())
    }

    #[test]
    fn invalid_amount_is_an_error() {
        assert!(parse_balance(r#"{"denom":"photon","amount":"-1"}"#).is_err());
        assert!(parse_balance(r#"{"denom":"photon"}"#).is_err());
    }

    #[test]
    fn parses_height_from_stderr() -> Result<(), Error> {
        let output = ExecOutput {
            stdout: String::new(),
            stderr: r#"{"NodeInfo":{},"SyncInfo":{"latest_block_height":"17"}}"#.to_string(),
        };

        assert_eq!(parse_latest_height(&output)?, 17);
        Ok(())
    }

    #[test]
    fn parses_height_from_stdout() -> Result<(), Error> {
        let output = ExecOutput {
            stdout: r#"{"node_info":{},"sync_info":{"latest_block_height":"3"}}"#.to_string(),
            stderr: String::new(),
        };

        assert_eq!(parse_latest_height(&output)?, 3);
        Ok(())
    }

    #[test]
    fn balance_query_uses_denom() -> Result<(), Error> {
        let executor = RecordingExecutor::with_stdout(&[r#"{"denom":"photon","amount":"5"}"#]);

        let amount = query_balance(&executor, "icad", "tcp://node-0:26657", "cosmos1abc", "photon")?;

        assert_eq!(amount, 5);
        assert!(executor
            .command(0)
            .windows(2)
            .any(|w| w[0] == "--denom" && w[1] == "photon"));

        Ok(())
    }
}
