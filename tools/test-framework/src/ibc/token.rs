use core::fmt::{self, Display};

/**
   An amount of a denomination, formatted the way the Cosmos SDK CLI
   expects coins, e.g. `10000photon`.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub denom: String,

    pub amount: u128,
}

impl Token {
    pub fn new(denom: &str, amount: u128) -> Self {
        Self {
            denom: denom.to_string(),
            amount,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
