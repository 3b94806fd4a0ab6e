/*!
   Framework code for making it easier to write test cases.

   Test cases implement [`BasicTest`](base::BasicTest) together with
   [`TestOverrides`](overrides::TestOverrides), and are run with
   [`run_basic_test`](base::run_basic_test), which initializes the test
   configuration and the docker network before calling the test.
*/

pub mod base;
pub mod cleanup;
pub mod overrides;
