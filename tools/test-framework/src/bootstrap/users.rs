/*!
   Creation of funded user accounts for a test.
*/

use tracing::info;

use crate::chain::ext::bootstrap::ChainBootstrapMethodsExt;
use crate::chain::node::{ChainNode, FAUCET_KEY_NAME};
use crate::chain::wait::wait_for_blocks;
use crate::error::Error;
use crate::types::wallet::{Wallet, WalletAmount};
use crate::util::random::{random_string, sanitize_name};

/// Blocks waited for the funding transfers to be committed.
const FUNDING_BLOCKS: u64 = 5;

/**
   Create one user per chain with the key name `<test_name>-<random>`,
   fund it with `amount` of the chain denomination from the faucet, and
   wait for the transfers to be committed.

   The wallets are returned in the order of the chains.
*/
pub fn get_and_fund_test_users(
    test_name: &str,
    amount: u128,
    chains: &[&ChainNode],
) -> Result<Vec<Wallet>, Error> {
    let users = chains
        .iter()
        .map(|chain| {
            let key_name = user_key_name(test_name);

            let user = chain.add_wallet(&key_name)?;

            chain.send_funds(
                FAUCET_KEY_NAME,
                &WalletAmount {
                    address: user.address.clone(),
                    denom: chain.denom().to_string(),
                    amount,
                },
            )?;

            info!(
                "funded user {} with {}{} on chain {}",
                user.address,
                amount,
                chain.denom(),
                chain.chain_id()
            );

            Ok(user)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    wait_for_blocks(FUNDING_BLOCKS, chains)?;

    Ok(users)
}

fn user_key_name(test_name: &str) -> String {
    sanitize_name(&format!("{}-{}", test_name, random_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_keys_are_unique_per_call() {
        let key1 = user_key_name("TestInterchainAccounts");
        let key2 = user_key_name("TestInterchainAccounts");

        assert!(key1.starts_with("testinterchainaccounts-"));
        assert_ne!(key1, key2);
    }
}
