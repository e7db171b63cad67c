// Shared modules
pub(crate) mod cli;
mod logging;
mod metadata;
pub(crate) mod run;
