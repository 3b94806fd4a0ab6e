use serde_json as json;

use crate::chain::cli::tx::check_result_code;
use crate::chain::exec::CommandExecutor;
use crate::error::Error;

const ICA_ADDRESS_FIELD: &str = "interchain_account_address";

/// Register a new interchain account controlled by the given account
/// over the given connection.
pub fn register_interchain_account(
    executor: &impl CommandExecutor,
    command_path: &str,
    chain_id: &str,
    home_path: &str,
    rpc_listen_address: &str,
    from: &str,
    connection_id: &str,
) -> Result<(), Error> {
    let args = &[
        command_path,
        "tx",
        "intertx",
        "register",
        "--from",
        from,
        "--connection-id",
        connection_id,
        "--chain-id",
        chain_id,
        "--home",
        home_path,
        "--node",
        rpc_listen_address,
        "--keyring-backend",
        "test",
        "--output",
        "json",
        "-y",
    ];

    let res = executor.exec(args)?.stdout;
    check_result_code(&res)?;

    Ok(())
}

/// Query the address of the interchain account
/// corresponding to the given controller account.
pub fn query_interchain_account(
    executor: &impl CommandExecutor,
    command_path: &str,
    chain_id: &str,
    home_path: &str,
    rpc_listen_address: &str,
    account: &str,
    connection_id: &str,
) -> Result<String, Error> {
    let args = &[
        command_path,
        "query",
        "intertx",
        "interchainaccounts",
        connection_id,
        account,
        "--chain-id",
        chain_id,
        "--home",
        home_path,
        "--node",
        rpc_listen_address,
        "--output",
        "json",
    ];

    let res = executor.exec(args)?.stdout;

    parse_interchain_account_output(&res)
}

/// Submit a msg from a controller account over an ICA channel
/// using the given connection.
pub fn interchain_submit(
    executor: &impl CommandExecutor,
    command_path: &str,
    chain_id: &str,
    home_path: &str,
    rpc_listen_address: &str,
    from: &str,
    connection_id: &str,
    msg: &str,
) -> Result<(), Error> {
    let args = &[
        command_path,
        "tx",
        "intertx",
        "submit",
        msg,
        "--connection-id",
        connection_id,
        "--from",
        from,
        "--chain-id",
        chain_id,
        "--home",
        home_path,
        "--node",
        rpc_listen_address,
        "--keyring-backend",
        "test",
        "--output",
        "json",
        "-y",
    ];

    let res = executor.exec(args)?.stdout;
    check_result_code(&res)?;

    Ok(())
}

/**
   Extract the interchain account address from the output of the
   `intertx interchainaccounts` query.

   The JSON output (`{"interchain_account_address":"cosmos1..."}`) is
   used when available. Otherwise the output is expected to be the
   single line `interchain_account_address: <address>`, which is handled
   by [`parse_interchain_account_field`].
*/
pub fn parse_interchain_account_output(stdout: &str) -> Result<String, Error> {
    match json::from_str::<json::Value>(stdout.trim()) {
        Ok(json::Value::Object(fields)) => {
            let address = fields
                .get(ICA_ADDRESS_FIELD)
                .and_then(|address| address.as_str())
                .ok_or_else(|| {
                    Error::parse(format!("expected string field `{ICA_ADDRESS_FIELD}` in {stdout}"))
                })?
                .trim();

            if address.is_empty() {
                Err(Error::parse(format!(
                    "empty interchain account address in {stdout}"
                )))
            } else {
                Ok(address.to_string())
            }
        }
        _ => parse_interchain_account_field(stdout),
    }
}

/**
   Splice the address out of a line of the form
   `interchain_account_address: cosmos1p76n3mn...`, by splitting at the
   first colon and trimming the remainder.

   Only this single line shape is supported. Output without a colon or
   with an empty address is rejected.
*/
pub fn parse_interchain_account_field(stdout: &str) -> Result<String, Error> {
    let (_, address) = stdout.split_once(':').ok_or_else(|| {
        Error::parse(format!(
            "expected `{ICA_ADDRESS_FIELD}: <address>` but got: {stdout:?}"
        ))
    })?;

    let address = address.trim();

    if address.is_empty() {
        Err(Error::parse(format!(
            "empty interchain account address in {stdout:?}"
        )))
    } else {
        Ok(address.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::exec::recording::RecordingExecutor;
    use crate::error::ErrorDetail;

    const ADDRESS: &str = "cosmos1p76n3mnanllea4d3av0v0e42tjj03cae06xq8fwn9at587rqp23qvxsv0j";

    #[test]
    fn parses_address_line() -> Result<(), Error> {
        let address =
            parse_interchain_account_field(&format!("interchain_account_address: {ADDRESS}\n"))?;

        assert_eq!(address, ADDRESS);
        Ok(())
    }

    #[test]
    fn line_without_colon_is_rejected() {
        let res = parse_interchain_account_field("interchain_account_address");

        assert!(matches!(
            res.map_err(|e| e.into_detail()),
            Err(ErrorDetail::Parse(_))
        ));
    }

    #[test]
    fn line_with_empty_address_is_rejected() {
        assert!(parse_interchain_account_field("interchain_account_address:   \n").is_err());
    }

    #[test]
    fn json_output_is_preferred() -> Result<(), Error> {
        let address =
            parse_interchain_account_output(&format!("{{\"{ICA_ADDRESS_FIELD}\":\"{ADDRESS}\"}}\n"))?;

        assert_eq!(address, ADDRESS);
        Ok(())
    }

    #[test]
    fn json_without_address_is_rejected() {
        assert!(parse_interchain_account_output("{\"other\":\"value\"}").is_err());
        assert!(parse_interchain_account_output("{\"interchain_account_address\":\"\"}").is_err());
    }

    #[test]
    fn text_output_falls_back_to_line() -> Result<(), Error> {
        let address =
            parse_interchain_account_output(&format!("interchain_account_address: {ADDRESS}"))?;

        assert_eq!(address, ADDRESS);
        Ok(())
    }

    #[test]
    fn register_builds_tx_command() -> Result<(), Error> {
        let executor = RecordingExecutor::with_stdout(&[r#"{"code":0,"raw_log":"[]"}"#]);

        register_interchain_account(
            &executor,
            "icad",
            "icad-1",
            "/var/cosmos-chain/icad",
            "tcp://node-0:26657",
            "cosmos1owner",
            "connection-0",
        )?;

        let command = executor.command(0);
        assert_eq!(&command[..4], &["icad", "tx", "intertx", "register"]);
        assert!(command
            .windows(2)
            .any(|w| w[0] == "--connection-id" && w[1] == "connection-0"));
        assert!(command.windows(2).any(|w| w[0] == "--from" && w[1] == "cosmos1owner"));
        assert_eq!(command.last().map(String::as_str), Some("-y"));

        Ok(())
    }

    #[test]
    fn failed_submit_is_an_error() {
        let executor =
            RecordingExecutor::with_stdout(&[r#"{"code":11,"raw_log":"out of gas"}"#]);

        let res = interchain_submit(
            &executor,
            "icad",
            "icad-1",
            "/var/cosmos-chain/icad",
            "tcp://node-0:26657",
            "cosmos1owner",
            "connection-0",
            "{}",
        );

        assert!(res.is_err());
        assert_eq!(executor.command(0)[4], "{}");
    }

    #[test]
    fn query_passes_connection_and_owner() -> Result<(), Error> {
        let executor = RecordingExecutor::with_stdout(&[&format!(
            "{{\"{ICA_ADDRESS_FIELD}\":\"{ADDRESS}\"}}"
        )]);

        let address = query_interchain_account(
            &executor,
            "icad",
            "icad-1",
            "/var/cosmos-chain/icad",
            "tcp://node-0:26657",
            "cosmos1owner",
            "connection-0",
        )?;

        assert_eq!(address, ADDRESS);
        assert_eq!(
            &executor.command(0)[..6],
            &[
                "icad",
                "query",
                "intertx",
                "interchainaccounts",
                "connection-0",
                "cosmos1owner"
            ]
        );

        Ok(())
    }
}
