//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every command the application layer accepts.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted command name, e.g. `campaign.assign_character`. Used as a
    /// span field when the command is handled.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}
