//! CLI subcommands.

pub mod deploy;
pub mod validate;
