/*!
   Utilities for retrying test operations.
*/

use core::time::Duration;
use std::thread::sleep;
use tracing::trace;

use crate::error::Error;

/**
   A simplified version of retry logic used for testing.
   We do not need complicated retry logic as we need this
   only to test eventual consistency, such as a chain
   reaching a given block height.
*/
pub fn assert_eventually_succeed<R>(
    task_name: &str,
    attempts: u16,
    interval: Duration,
    mut task: impl FnMut() -> Result<R, Error>,
) -> Result<R, Error> {
    for _ in 0..attempts {
        match task() {
            Ok(res) => return Ok(res),
            Err(e) => {
                trace!("retrying task that failed with error: {}", e);
                sleep(interval)
            }
        }
    }

    Err(Error::retry(task_name.to_string(), attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;

    #[test]
    fn succeeds_after_failures() -> Result<(), Error> {
        let mut calls = 0;

        let res = assert_eventually_succeed("count", 5, Duration::from_millis(1), || {
            calls += 1;
            if calls < 3 {
                Err(Error::assertion("not yet".to_string()))
            } else {
                Ok(calls)
            }
        })?;

        assert_eq!(res, 3);
        Ok(())
    }

    #[test]
    fn gives_up_after_attempts() {
        let mut calls = 0;

        let res: Result<(), Error> =
            assert_eventually_succeed("never", 4, Duration::from_millis(1), || {
                calls += 1;
                Err(Error::assertion("never".to_string()))
            });

        assert_eq!(calls, 4);
        assert!(matches!(
            res.map_err(|e| e.into_detail()),
            Err(ErrorDetail::Retry(e)) if e.attempts == 4
        ));
    }
}
