//! Subcommand modules for the `nwalign` binary.

pub mod align;
pub mod matrix;
