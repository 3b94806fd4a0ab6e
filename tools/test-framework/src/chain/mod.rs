/*!
   Functionality for managing the chains of a test, from provisioning
   the nodes in docker to querying and sending transactions through the
   chain CLI.
*/

pub mod chain_type;
pub mod cli;
pub mod config;
pub mod exec;
pub mod ext;
pub mod factory;
pub mod node;
pub mod spec;
pub mod wait;
