use eyre::eyre;
use serde_json as json;

use crate::error::{handle_generic_error, Error};

/// Check that a command succeeded, by ensuring that the JSON emitted
/// contains a `code` integer field set to 0.
pub fn check_result_code(res: &str) -> Result<(), Error> {
    let json_res = json::from_str::<json::Value>(res.trim()).map_err(handle_generic_error)?;

    let code = json_res
        .get("code")
        .ok_or_else(|| eyre!("expected `code` field"))?
        .as_i64()
        .ok_or_else(|| eyre!("expected integer field"))?;

    if code == 0 {
        Ok(())
    } else {
        let raw_log = json_res
            .get("raw_log")
            .ok_or_else(|| eyre!("expected `raw_log` field"))?
            .as_str()
            .ok_or_else(|| eyre!("expected string field"))?;

        Err(Error::tx_failed(code, raw_log.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;

    #[test]
    fn zero_code_is_success() {
        let res = r#"{"height":"0","txhash":"AB12","codespace":"","code":0,"raw_log":"[]"}"#;

        assert!(check_result_code(res).is_ok());
    }

    #[test]
    fn non_zero_code_carries_raw_log() {
        let res = r#"{"txhash":"AB12","code":5,"raw_log":"insufficient funds"}"#;

        match check_result_code(res).map_err(|e| e.into_detail()) {
            Err(ErrorDetail::TxFailed(e)) => {
                assert_eq!(e.code, 5);
                assert_eq!(e.raw_log, "insufficient funds");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_code_is_an_error() {
        assert!(check_result_code(r#"{"txhash":"AB12"}"#).is_err());
        assert!(check_result_code("gas estimate: 1000").is_err());
    }
}
