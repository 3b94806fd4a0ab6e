use core::fmt::Debug;

use crate::error::Error;

pub fn assert_eq<T: Eq + Debug>(message: &str, left: &T, right: &T) -> Result<(), Error> {
    if left == right {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect left ({:?}) to be equal to right ({:?}): {}",
            left, right, message
        )))
    }
}

pub fn assert_not_eq<T: Eq + Debug>(message: &str, left: &T, right: &T) -> Result<(), Error> {
    if left != right {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect left ({:?}) to be not equal to right ({:?}): {}",
            left, right, message
        )))
    }
}

pub fn assert_len<T: Debug>(message: &str, items: &[T], expected: usize) -> Result<(), Error> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect {} items but got {} ({:?}): {}",
            expected,
            items.len(),
            items,
            message
        )))
    }
}

pub fn assert_err<T: Debug, E: Debug>(message: &str, result: Result<T, E>) -> Result<(), Error> {
    if result.is_err() {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expect result ({:?}) to be an error: {}",
            result, message
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;

    #[test]
    fn equal_values_pass() {
        assert!(assert_eq("balance", &10u128, &10u128).is_ok());
        assert!(assert_not_eq("address", &"a", &"b").is_ok());
    }

    #[test]
    fn mismatch_is_an_assertion_error() {
        let e = assert_eq("sender balance", &9_990u128, &10_000u128)
            .err()
            .map(|e| e.into_detail());

        match e {
            Some(ErrorDetail::Assertion(e)) => {
                assert!(e.message.contains("sender balance"));
                assert!(e.message.contains("9990"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn length_is_checked() {
        assert!(assert_len("channels", &["channel-0"], 1).is_ok());
        assert!(assert_len("channels", &["channel-0"], 2).is_err());
    }

    #[test]
    fn expected_error_passes() {
        assert!(assert_err::<(), _>("parse", Err("bad")).is_ok());
        assert!(assert_err::<_, ()>("parse", Ok(1)).is_err());
    }
}
