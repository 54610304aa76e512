// library crate for gridscan
// the binary is a thin wrapper over cli::run

pub mod cli;
pub mod conditions;
pub mod config;
pub mod scanner;
pub mod world;
