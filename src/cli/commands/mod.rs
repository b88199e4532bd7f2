//! Subcommands of the `critpath` binary.

pub mod check;
pub mod walk;
