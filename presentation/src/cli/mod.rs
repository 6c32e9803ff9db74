//! Command-line interface definitions and input handling

pub mod commands;
pub mod script;
