//! CLI command handlers

pub mod commands;

pub use commands::{add, fields, sheets, show, template};
