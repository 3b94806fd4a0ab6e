/*!
   Types for IBC and Cosmos SDK messages used by the tests.
*/

pub mod msg;
pub mod token;
