/*!
   Functions for initializing each test at the beginning of a Rust test
   session.
*/

use eyre::Report as Error;
use std::env;
use std::fs;
use std::io::{stderr, IsTerminal};
use std::sync::Once;
use tracing::warn;
use tracing_subscriber::{
    self as ts,
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::types::config::TestConfig;
use crate::util::random::random_u32;

static INIT: Once = Once::new();

/**
   Initialize the test with a global logger and error handlers,
   read the environment variables and return a [`TestConfig`].
*/
pub fn init_test() -> Result<TestConfig, Error> {
    let no_color_log = env_flag("NO_COLOR_LOG");

    INIT.call_once(|| {
        let with_color = stderr().is_terminal() && !no_color_log;

        install_logger(with_color);

        if with_color {
            if let Err(e) = color_eyre::install() {
                warn!("failed to install color-eyre error report handler: {}", e);
            }
        }
    });

    let docker_command_path = env::var("DOCKER_COMMAND").unwrap_or_else(|_| "docker".to_string());

    let base_chain_store_dir = env::var("CHAIN_STORE_DIR").unwrap_or_else(|_| "data".to_string());

    let test_id = random_u32().to_string();

    let chain_store_dir = format!("{}/test-{}", base_chain_store_dir, test_id);

    fs::create_dir_all(&chain_store_dir)?;

    let chain_store_dir = fs::canonicalize(chain_store_dir)?;

    Ok(TestConfig {
        test_id,
        docker_command_path,
        chain_store_dir,
        pull_images: !env_flag("SKIP_IMAGE_PULL"),
        keep_containers: env_flag("KEEP_CONTAINERS"),
    })
}

fn env_flag(name: &str) -> bool {
    env::var(name).ok().map(|val| val == "1").unwrap_or(false)
}

/**
   Install the [`tracing_subscriber`] logger handlers so that logs will
   be displayed during test.
*/
pub fn install_logger(with_color: bool) {
    // Use log level INFO by default if RUST_LOG is not set.
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let layer = ts::fmt::layer().with_ansi(with_color);

    ts::registry().with(env_filter).with(layer).init();
}
