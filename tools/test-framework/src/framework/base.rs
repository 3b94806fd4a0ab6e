/*!
   The test runners. A test case implements [`BasicTest`] and is started
   from a `#[test]` function with [`run_basic_test`], which prepares the
   environment shared by every docker-backed test before calling it.
*/

use tracing::info;

use crate::bootstrap::docker::docker_setup;
use crate::bootstrap::init::init_test;
use crate::docker::DockerNetwork;
use crate::error::Error;
use crate::types::config::TestConfig;

pub fn run_test<Test: PrimitiveTest>(test: &Test) -> Result<(), Error> {
    test.run()
}

/**
   Run a test case implementing [`BasicTest`], with the test
   configuration modified by its [`TestOverrides`](crate::framework::overrides::TestOverrides).
*/
pub fn run_basic_test<Test, Overrides>(test: &Test) -> Result<(), Error>
where
    Test: BasicTest,
    Test: HasOverrides<Overrides = Overrides>,
    Overrides: TestConfigOverride,
{
    run_test(&RunBasicTest { test })
}

/**
   Gives access to the value implementing the override traits of a test
   case. Implemented for every
   [`TestOverrides`](crate::framework::overrides::TestOverrides) type.
*/
pub trait HasOverrides {
    type Overrides;

    fn get_overrides(&self) -> &Self::Overrides;
}

/**
   A test case that does its own setup.
*/
pub trait PrimitiveTest {
    fn run(&self) -> Result<(), Error>;
}

/**
   A test case running its chains and relayers in docker.

   The test gets the [`TestConfig`] read from the environment and the
   [`DockerNetwork`] its containers join. The network is removed once the
   test returns, so the chains and relayers of the test must not outlive
   the `run` call.
*/
pub trait BasicTest {
    fn run(&self, config: &TestConfig, network: &DockerNetwork) -> Result<(), Error>;
}

pub trait TestConfigOverride {
    fn modify_test_config(&self, config: &mut TestConfig);
}

/**
   Lifts a [`BasicTest`] into a [`PrimitiveTest`] by initializing the
   logger, the test configuration and the docker network.
*/
pub struct RunBasicTest<'a, Test> {
    pub test: &'a Test,
}

impl<'a, Test, Overrides> PrimitiveTest for RunBasicTest<'a, Test>
where
    Test: BasicTest,
    Test: HasOverrides<Overrides = Overrides>,
    Overrides: TestConfigOverride,
{
    fn run(&self) -> Result<(), Error> {
        let mut config = init_test()?;
        self.test.get_overrides().modify_test_config(&mut config);

        info!("starting test with test config: {:?}", config);

        let network = docker_setup(&config)?;

        let res = self.test.run(&config, &network);

        match &res {
            Ok(()) => info!("test {} passed", config.test_id),
            Err(e) => info!(
                "test {} failed, logs are saved in {}: {}",
                config.test_id,
                config.chain_store_dir.display(),
                e
            ),
        }

        res
    }
}
