use crate::chain::cli::tx::check_result_code;
use crate::chain::exec::CommandExecutor;
use crate::error::Error;

/**
   Send tokens with `tx bank send`, signed by the key `sender` from the
   `test` keyring of the chain home directory.
*/
pub fn bank_send(
    executor: &impl CommandExecutor,
    command_path: &str,
    chain_id: &str,
    home_path: &str,
    rpc_listen_address: &str,
    sender: &str,
    recipient: &str,
    token: &str,
    gas_prices: &str,
    gas_adjustment: f64,
) -> Result<(), Error> {
    let gas_adjustment = gas_adjustment.to_string();

    let args = &[
        command_path,
        "tx",
        "bank",
        "send",
        sender,
        recipient,
        token,
        "--chain-id",
        chain_id,
        "--home",
        home_path,
        "--node",
        rpc_listen_address,
        "--keyring-backend",
        "test",
        "--gas-prices",
        gas_prices,
        "--gas-adjustment",
        &gas_adjustment,
        "--gas",
        "auto",
        "--output",
        "json",
        "-y",
    ];

    let res = executor.exec(args)?.stdout;
    check_result_code(&res)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::exec::recording::RecordingExecutor;

    #[test]
    fn send_passes_token_and_gas() -> Result<(), Error> {
        let executor = RecordingExecutor::with_stdout(&[r#"{"code":0,"raw_log":"[]"}"#]);

        bank_send(
            &executor,
            "icad",
            "icad-2",
            "/var/cosmos-chain/icad",
            "tcp://node-1:26657",
            "user",
            "cosmos1ica",
            "10000photon",
            "0.00photon",
            1.2,
        )?;

        let command = executor.command(0);
        assert_eq!(&command[..7], &["icad", "tx", "bank", "send", "user", "cosmos1ica", "10000photon"]);
        assert!(command
            .windows(2)
            .any(|w| w[0] == "--gas-adjustment" && w[1] == "1.2"));

        Ok(())
    }
}
