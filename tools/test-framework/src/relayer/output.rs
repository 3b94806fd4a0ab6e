/*!
   Types for the query output of the relayer, which prints one JSON
   object per line.
*/

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const STATE_OPEN: &str = "STATE_OPEN";
pub const STATE_CLOSED: &str = "STATE_CLOSED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOutput {
    pub id: String,

    pub client_id: String,

    pub state: String,

    #[serde(default)]
    pub counterparty: ConnectionCounterparty,

    #[serde(default)]
    pub delay_period: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCounterparty {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub connection_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOutput {
    pub state: String,

    pub ordering: String,

    pub counterparty: ChannelCounterparty,

    pub connection_hops: Vec<String>,

    pub version: String,

    pub port_id: String,

    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCounterparty {
    pub port_id: String,

    #[serde(default)]
    pub channel_id: String,
}

impl ConnectionOutput {
    pub fn is_open(&self) -> bool {
        self.state == STATE_OPEN
    }
}

impl ChannelOutput {
    pub fn is_open(&self) -> bool {
        self.state == STATE_OPEN
    }

    pub fn is_closed(&self) -> bool {
        self.state == STATE_CLOSED
    }
}

/**
   Parse output with one JSON value per line. Lines that are not JSON
   objects, such as log lines, are skipped.
*/
pub fn parse_json_lines<T: DeserializeOwned>(output: &str) -> Result<Vec<T>, Error> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTIONS: &str = r#"{"id":"connection-0","client_id":"07-tendermint-0","versions":[{"identifier":"1","features":["ORDER_ORDERED","ORDER_UNORDERED"]}],"state":"STATE_OPEN","counterparty":{"client_id":"07-tendermint-0","connection_id":"connection-0","prefix":{"key_prefix":"aWJj"}},"delay_period":"0"}
"#;

    const CHANNELS: &str = r#"{"state":"STATE_CLOSED","ordering":"ORDER_ORDERED","counterparty":{"port_id":"icahost","channel_id":"channel-0"},"connection_hops":["connection-0"],"version":"ics27-1","port_id":"icacontroller-cosmos1owner","channel_id":"channel-0"}
2023-01-01T00:00:00Z info querying channels
{"state":"STATE_OPEN","ordering":"ORDER_ORDERED","counterparty":{"port_id":"icahost","channel_id":"channel-1"},"connection_hops":["connection-0"],"version":"ics27-1","port_id":"icacontroller-cosmos1owner","channel_id":"channel-1"}
"#;

    #[test]
    fn parses_connections() -> Result<(), Error> {
        let connections: Vec<ConnectionOutput> = parse_json_lines(CONNECTIONS)?;

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].id, "connection-0");
        assert_eq!(connections[0].counterparty.connection_id, "connection-0");
        assert!(connections[0].is_open());

        Ok(())
    }

    #[test]
    fn parses_channels_skipping_log_lines() -> Result<(), Error> {
        let channels: Vec<ChannelOutput> = parse_json_lines(CHANNELS)?;

        assert_eq!(channels.len(), 2);
        assert!(channels[0].is_closed());
        assert!(!channels[0].is_open());
        assert!(channels[1].is_open());
        assert_eq!(channels[1].counterparty.channel_id, "channel-1");
        assert_eq!(channels[1].connection_hops, vec!["connection-0"]);

        Ok(())
    }

    #[test]
    fn empty_output_has_no_records() -> Result<(), Error> {
        let channels: Vec<ChannelOutput> = parse_json_lines("\n")?;

        assert!(channels.is_empty());

        Ok(())
    }

    #[test]
    fn malformed_record_is_an_error() {
        let res: Result<Vec<ChannelOutput>, Error> = parse_json_lines(r#"{"state":"STATE_OPEN"}"#);

        assert!(res.is_err());
    }
}
