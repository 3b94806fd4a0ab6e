#![allow(clippy::too_many_arguments)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, doc))]
pub mod tests;
