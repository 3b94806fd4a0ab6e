/*!
   Definitions of data types used by the tests.
*/

pub mod config;
pub mod env;
pub mod wallet;
