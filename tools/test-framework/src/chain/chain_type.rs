use core::str::FromStr;

use crate::error::Error;

/**
   The family of chain a [`ChainConfig`](crate::chain::spec::ChainConfig)
   describes. Only Cosmos SDK chains driven through their CLI are
   supported for now.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainType {
    Cosmos,
}

impl ChainType {
    /// The chain type name used in the relayer chain configuration.
    pub fn relayer_chain_type(&self) -> &'static str {
        match self {
            Self::Cosmos => "cosmos",
        }
    }
}

impl FromStr for ChainType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosmos" => Ok(ChainType::Cosmos),
            _ => Err(Error::parse(format!("unsupported chain type: {s}"))),
        }
    }
}
