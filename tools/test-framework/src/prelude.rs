/*!
   Re-export of common constructs that are used by test cases.
*/

pub use core::time::Duration;
pub use eyre::eyre;
pub use std::thread::sleep;
pub use tracing::{debug, error, info, warn};

pub use crate::bootstrap::init::init_test;
pub use crate::bootstrap::users::get_and_fund_test_users;
pub use crate::chain::exec::{CommandExecutor, ExecOutput};
pub use crate::chain::ext::bootstrap::ChainBootstrapMethodsExt;
pub use crate::chain::ext::ica::InterchainAccountMethodsExt;
pub use crate::chain::factory::ChainFactory;
pub use crate::chain::node::ChainNode;
pub use crate::chain::spec::{ChainConfig, ChainSpec};
pub use crate::chain::wait::wait_for_blocks;
pub use crate::docker::{DockerImage, DockerNetwork};
pub use crate::error::{handle_generic_error, Error};
pub use crate::framework::base::{run_basic_test, BasicTest};
pub use crate::framework::cleanup::Cleanup;
pub use crate::framework::overrides::TestOverrides;
pub use crate::ibc::msg::MsgSend;
pub use crate::ibc::token::Token;
pub use crate::interchain::{Interchain, InterchainBuildOptions, InterchainLink};
pub use crate::relayer::driver::{ChannelOptions, CreateClientOptions, RelayerDriver};
pub use crate::relayer::factory::{RelayerFactory, RelayerType};
pub use crate::relayer::options::{
    custom_docker_image, image_pull, startup_flags, RelayerOption, RelayerOptions,
};
pub use crate::relayer::output::{ChannelOutput, ConnectionOutput, STATE_CLOSED, STATE_OPEN};
pub use crate::types::config::TestConfig;
pub use crate::types::env::write_env;
pub use crate::types::wallet::{Wallet, WalletAddress, WalletAmount};
pub use crate::util::assert::{assert_eq, assert_err, assert_len, assert_not_eq};
pub use crate::util::retry::assert_eventually_succeed;
