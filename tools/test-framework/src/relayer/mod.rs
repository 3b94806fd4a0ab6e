/*!
   Running and controlling the relayer of a test.

   The relayer is configured through [`options`] when it is built by the
   [`factory`], and then driven through the commands of
   [`RelayerDriver`](driver::RelayerDriver).
*/

pub mod config;
pub mod driver;
pub mod factory;
pub mod options;
pub mod output;
