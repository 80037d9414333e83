//! Runtime configuration for the campaign registry.
//!
//! The core has no environment or file access of its own. Hosts deserialize
//! a [`TabletopConfig`] from whatever source they use and hand it to the
//! registry; every field falls back to its default when omitted.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Width of a grid allocated without explicit dimensions.
pub const DEFAULT_GRID_WIDTH: u32 = 15;

/// Height of a grid allocated without explicit dimensions.
pub const DEFAULT_GRID_HEIGHT: u32 = 15;

/// Largest accepted grid width or height.
pub const MAX_GRID_DIMENSION: u32 = 4096;

/// Invite codes drawn per campaign before giving up on a unique one.
pub const DEFAULT_INVITE_CODE_ATTEMPTS: u32 = 16;

/// Tunables for campaign and scene creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabletopConfig {
    /// Grid width for scenes added through the registry.
    pub default_grid_width: u32,
    /// Grid height for scenes added through the registry.
    pub default_grid_height: u32,
    /// Maximum invite-code draws when resolving collisions.
    pub invite_code_attempts: u32,
}

impl Default for TabletopConfig {
    fn default() -> Self {
        Self {
            default_grid_width: DEFAULT_GRID_WIDTH,
            default_grid_height: DEFAULT_GRID_HEIGHT,
            invite_code_attempts: DEFAULT_INVITE_CODE_ATTEMPTS,
        }
    }
}

impl TabletopConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the document is malformed or any
    /// value fails [`TabletopConfig::validate`].
    pub fn from_json(source: &str) -> Result<Self, DomainError> {
        let config: Self = serde_json::from_str(source)
            .map_err(|e| DomainError::Validation(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGridDimensions` for a grid dimension that
    /// is zero or above [`MAX_GRID_DIMENSION`], and `DomainError::Validation`
    /// for zero invite-code attempts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.default_grid_width == 0 || self.default_grid_height == 0 {
            return Err(DomainError::InvalidGridDimensions {
                width: self.default_grid_width,
                height: self.default_grid_height,
                reason: "width and height must be at least 1",
            });
        }
        if self.default_grid_width > MAX_GRID_DIMENSION
            || self.default_grid_height > MAX_GRID_DIMENSION
        {
            return Err(DomainError::InvalidGridDimensions {
                width: self.default_grid_width,
                height: self.default_grid_height,
                reason: "width and height must not exceed 4096",
            });
        }
        if self.invite_code_attempts == 0 {
            return Err(DomainError::Validation(
                "invite_code_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
