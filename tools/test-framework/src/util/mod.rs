/*!
   Utility functions that are used by the framework.
*/

pub mod assert;
pub mod file;
pub mod random;
pub mod retry;
