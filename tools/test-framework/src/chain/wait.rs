/*!
   Waiting for chains to make progress.
*/

use core::time::Duration;
use tracing::{debug, info};

use crate::chain::node::ChainNode;
use crate::error::Error;
use crate::util::retry::assert_eventually_succeed;

/// Interval between two height queries.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Blocks are expected at most this many times slower than the configured
/// block time before a chain is considered stalled.
const STALL_FACTOR: u32 = 10;

/// Attempts made while waiting for a freshly started chain.
const FIRST_BLOCK_ATTEMPTS: u16 = 120;

/**
   Wait until every one of the given chains has produced `delta` more
   blocks than its height when this function is called.

   Fails with [`Error::retry`] when a chain stops producing blocks.
*/
pub fn wait_for_blocks(delta: u64, chains: &[&ChainNode]) -> Result<(), Error> {
    let targets = chains
        .iter()
        .map(|chain| Ok((*chain, chain.height()? + delta)))
        .collect::<Result<Vec<_>, Error>>()?;

    for (chain, target) in targets {
        let attempts = poll_attempts(delta, chain.config.block_time);

        let height = assert_eventually_succeed(
            &format!("chain {} reaches height {}", chain.chain_id(), target),
            attempts,
            POLL_INTERVAL,
            || {
                let height = chain.height()?;
                if height >= target {
                    Ok(height)
                } else {
                    Err(Error::generic(eyre::eyre!(
                        "chain {} is at height {}, waiting for {}",
                        chain.chain_id(),
                        height,
                        target
                    )))
                }
            },
        )?;

        debug!("chain {} reached height {}", chain.chain_id(), height);
    }

    Ok(())
}

/**
   Wait until a freshly started chain answers status queries with a
   non-zero height.
*/
pub fn wait_for_first_block(chain: &ChainNode) -> Result<(), Error> {
    let height = assert_eventually_succeed(
        &format!("chain {} produces its first block", chain.chain_id()),
        FIRST_BLOCK_ATTEMPTS,
        POLL_INTERVAL,
        || {
            let height = chain.height()?;
            if height > 0 {
                Ok(height)
            } else {
                Err(Error::generic(eyre::eyre!("no block produced yet")))
            }
        },
    )?;

    info!("chain {} is producing blocks at height {}", chain.chain_id(), height);

    Ok(())
}

fn poll_attempts(delta: u64, block_time: Duration) -> u16 {
    let max_wait_ms = block_time.as_millis() * u128::from(STALL_FACTOR) * u128::from(delta.max(1));
    let attempts = max_wait_ms / POLL_INTERVAL.as_millis();

    attempts.clamp(10, u16::MAX as u128) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_scale_with_blocks() {
        assert_eq!(poll_attempts(5, Duration::from_secs(1)), 100);
        assert_eq!(poll_attempts(15, Duration::from_secs(2)), 600);
    }

    #[test]
    fn attempts_are_bounded() {
        assert_eq!(poll_attempts(0, Duration::from_millis(10)), 10);
        assert_eq!(poll_attempts(u64::MAX, Duration::from_secs(60)), u16::MAX);
    }
}
