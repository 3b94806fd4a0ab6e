pub mod bootstrap;
pub mod ica;
