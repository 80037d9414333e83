//! Campaign invite codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabletop_core::error::DomainError;
use tabletop_core::rng::DeterministicRng;

/// Number of characters in an invite code.
pub const INVITE_CODE_LENGTH: usize = 6;

/// Characters an invite code is drawn from.
pub const INVITE_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[allow(clippy::cast_possible_truncation)]
const LAST_ALPHABET_INDEX: u32 = (INVITE_CODE_ALPHABET.len() - 1) as u32;

/// Six uppercase alphanumeric characters players type to join a campaign.
///
/// Uniqueness across campaigns is not guaranteed here; the registry
/// redraws on collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    /// Draws a code with each character uniform over the alphabet.
    pub fn generate(rng: &mut dyn DeterministicRng) -> Self {
        let code = (0..INVITE_CODE_LENGTH)
            .map(|_| {
                let index = rng.next_u32_range(0, LAST_ALPHABET_INDEX) as usize;
                char::from(INVITE_CODE_ALPHABET[index % INVITE_CODE_ALPHABET.len()])
            })
            .collect();
        Self(code)
    }

    /// The code as typed by players.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for InviteCode {
    type Err = DomainError;

    /// Accepts surrounding whitespace and lowercase letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let valid = code.len() == INVITE_CODE_LENGTH
            && code.bytes().all(|byte| INVITE_CODE_ALPHABET.contains(&byte));
        if !valid {
            return Err(DomainError::Validation(format!(
                "invite code must be {INVITE_CODE_LENGTH} characters from A-Z and 0-9, got {s:?}"
            )));
        }
        Ok(Self(code))
    }
}

impl TryFrom<String> for InviteCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InviteCode> for String {
    fn from(code: InviteCode) -> Self {
        code.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
