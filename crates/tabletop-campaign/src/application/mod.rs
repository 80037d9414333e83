//! Application layer for the campaign context.

pub mod command_handlers;
pub mod query_handlers;
pub mod registry;
