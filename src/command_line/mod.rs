//! Command-line argument definitions and command handlers.

pub(crate) mod cli;
