/*!
   Functions that build and run chain CLI commands.

   Each function takes a [`CommandExecutor`](crate::chain::exec::CommandExecutor)
   together with the plain values needed for the command line, so that
   the command construction and output parsing can be tested without a
   running chain.
*/

pub mod bootstrap;
pub mod ica;
pub mod query;
pub mod transfer;
pub mod tx;
