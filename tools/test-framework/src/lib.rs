// #![deny(warnings)]
#![allow(clippy::too_many_arguments)]
#![doc = include_str!("../README.md")]

//!
//! ## Overview
//!
//! This test framework runs Cosmos SDK chains and an IBC relayer in docker
//! containers, and drives them through their command line interfaces, so
//! that end-to-end tests can exercise IBC applications such as interchain
//! accounts against real chain binaries.
//!
//! ## Example Test
//!
//! ```rust,ignore
//! use ibc_ica_test_framework::prelude::*;
//!
//! pub struct ExampleTest;
//!
//! #[test]
//! pub fn example_test() -> Result<(), Error> {
//!     run_basic_test(&ExampleTest)
//! }
//!
//! impl TestOverrides for ExampleTest {}
//!
//! impl BasicTest for ExampleTest {
//!     fn run(&self, config: &TestConfig, network: &DockerNetwork) -> Result<(), Error> {
//!         let chains = ChainFactory::new(
//!             config,
//!             vec![ChainSpec::new("icad", "v0.3.5"), ChainSpec::new("icad", "v0.3.5")],
//!         )
//!         .chains("example")?;
//!
//!         let relayer = RelayerFactory::new(RelayerType::CosmosRly, vec![])
//!             .build(config, network)?;
//!
//!         Interchain::new()
//!             .add_chain(&chains[0])
//!             .add_chain(&chains[1])
//!             .add_relayer(&relayer, "relayer")
//!             .add_link(InterchainLink {
//!                 chain1: &chains[0],
//!                 chain2: &chains[1],
//!                 relayer: &relayer,
//!                 path: "example-path".to_string(),
//!             })
//!             .build(&InterchainBuildOptions {
//!                 test_name: "example".to_string(),
//!                 network: network.name().to_string(),
//!                 pull_images: config.pull_images,
//!                 skip_path_creation: false,
//!             })?;
//!
//!         Ok(())
//!     }
//! }
//! ```
//!
//! The `example_test` function only specifies what kind of test to run.
//! [`run_basic_test`](framework::base::run_basic_test) reads the
//! [`TestConfig`](types::config::TestConfig) from the environment, creates
//! the docker network of the test and then calls the `run` method of the
//! [`BasicTest`](framework::base::BasicTest) implementation.
//!
//! Chains, relayers and the network are removed when they are dropped at
//! the end of the test, in the reverse order of their creation. Container
//! logs are saved under the test directory before the containers are
//! removed.
//!
//! ## Running Tests
//!
//! ```bash
//! RUST_LOG=info RUST_BACKTRACE=1 \
//!     cargo test -p ibc-ica-integration-test --features ica -- --nocapture
//! ```
//!
//! The environment variable `RUST_LOG` controls the log level. Take a look
//! at the [`TestConfig`](types::config::TestConfig) type for the other
//! environment variables that configure how tests are run.

pub mod bootstrap;
pub mod chain;
pub mod docker;
pub mod error;
pub mod framework;
pub mod ibc;
pub mod interchain;
pub mod prelude;
pub mod relayer;
pub mod types;
pub mod util;
