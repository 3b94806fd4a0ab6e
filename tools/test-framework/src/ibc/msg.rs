/*!
   Cosmos SDK messages in their JSON form, as accepted by
   `intertx submit` to be executed by an interchain account.
*/

use serde::{Deserialize, Serialize};

use crate::ibc::token::Token;

pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// A coin, with the amount encoded as a string like the SDK does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,

    pub amount: String,
}

impl From<&Token> for Coin {
    fn from(token: &Token) -> Self {
        Self {
            denom: token.denom.clone(),
            amount: token.amount.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    #[serde(rename = "@type")]
    pub type_url: String,

    pub from_address: String,

    pub to_address: String,

    pub amount: Vec<Coin>,
}

impl MsgSend {
    pub fn new(from_address: &str, to_address: &str, tokens: &[Token]) -> Self {
        Self {
            type_url: MSG_SEND_TYPE_URL.to_string(),
            from_address: from_address.to_string(),
            to_address: to_address.to_string(),
            amount: tokens.iter().map(Coin::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bank_send_has_sdk_json_shape() -> Result<(), serde_json::Error> {
        let msg = MsgSend::new(
            "cosmos1ica",
            "cosmos1user",
            &[Token::new("photon", 10_000)],
        );

        assert_eq!(
            serde_json::to_value(&msg)?,
            json!({
                "@type": "/cosmos.bank.v1beta1.MsgSend",
                "from_address": "cosmos1ica",
                "to_address": "cosmos1user",
                "amount": [{ "denom": "photon", "amount": "10000" }]
            })
        );

        Ok(())
    }
}
