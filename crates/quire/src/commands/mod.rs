//! CLI command implementations.

pub(crate) mod process;
pub(crate) mod processors;

pub(crate) use process::ProcessArgs;
