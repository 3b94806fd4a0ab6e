/*!
   Definition for the test configuration.
*/

use core::fmt::Debug;
use std::path::PathBuf;

use crate::docker::Docker;

/**
   The test configuration, loaded from the environment variables by
   [`init_test`](crate::bootstrap::init::init_test).

   Test writers can override it through
   [`TestOverrides::modify_test_config`](crate::framework::overrides::TestOverrides::modify_test_config).
*/
#[derive(Debug, Clone)]
pub struct TestConfig {
    /**
       A random identifier of the current test run, which is used as
       prefix for all docker resources of the test so that tests can run
       in parallel.
    */
    pub test_id: String,

    /**
       The filesystem path to the docker CLI.

       Configured through the `DOCKER_COMMAND` environment variable.
       Defaults to `docker`.
    */
    pub docker_command_path: String,

    /**
       The directory where the `.env` files and container logs of the
       test are written.

       Configured through the `CHAIN_STORE_DIR` environment variable,
       with a `test-<random>` sub-directory created per test.
    */
    pub chain_store_dir: PathBuf,

    /**
       Whether to `docker pull` the chain and relayer images before the
       test. Disabled with `SKIP_IMAGE_PULL=1`.
    */
    pub pull_images: bool,

    /**
       Keep the containers, volumes and network of the test after it
       finishes. Enabled with `KEEP_CONTAINERS=1`.
    */
    pub keep_containers: bool,
}

impl TestConfig {
    pub fn docker(&self) -> Docker {
        Docker::new(&self.docker_command_path, self.keep_containers)
    }
}
