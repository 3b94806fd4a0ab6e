/*!
   Constructs for implementing overrides for test cases.
*/

use crate::framework::base::{HasOverrides, TestConfigOverride};
use crate::types::config::TestConfig;

/**
   This trait should be implemented for all test cases to allow overriding
   some parts of the behavior during the test setup.

   Since all methods in this trait have default implementation, test cases
   that do not need any override can have an empty implementation body for
   this trait.
*/
pub trait TestOverrides {
    /**
        Modify the test configuration loaded from the environment
        variables, for example to disable image pulls.

        The default implementation does nothing.
    */
    fn modify_test_config(&self, _config: &mut TestConfig) {}
}

impl<Test: TestOverrides> HasOverrides for Test {
    type Overrides = Self;

    fn get_overrides(&self) -> &Self {
        self
    }
}

impl<Test: TestOverrides> TestConfigOverride for Test {
    fn modify_test_config(&self, config: &mut TestConfig) {
        TestOverrides::modify_test_config(self, config)
    }
}
