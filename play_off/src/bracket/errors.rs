//! Bracket error types.

use super::models::ParticipantId;
use thiserror::Error;

/// Bracket errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Participant is not part of this bracket
    #[error("Participant {0} is not part of this bracket")]
    UnknownParticipant(ParticipantId),

    /// Seeding length is zero or not a power of two
    #[error("Invalid seeding size {0}: must be a positive power of two")]
    InvalidSeedingSize(usize),

    /// Seeding is larger than the configured limit
    #[error("Seeding has {len} slots, maximum is {max}")]
    TooManySlots { len: usize, max: usize },

    /// Same participant seeded in two slots
    #[error("Participant {0} is seeded more than once")]
    DuplicateParticipant(ParticipantId),

    /// Recorded winner did not play in the match
    #[error("Invalid winner {winner} for match ({left}, {right})")]
    InvalidWinner {
        left: ParticipantId,
        right: ParticipantId,
        winner: ParticipantId,
    },

    /// Result recorded for a pairing that does not occur in the bracket
    #[error("Result for ({left}, {right}) matches no pairing in the bracket")]
    UnmatchedResult {
        left: ParticipantId,
        right: ParticipantId,
    },

    /// Invalid configuration value
    #[error("Invalid configuration for {var}: {reason}")]
    InvalidConfig { var: String, reason: String },
}

impl BracketError {
    /// Whether the error was caused by caller-supplied bracket data
    ///
    /// These should be reported to the invoking layer as bad requests.
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, BracketError::InvalidConfig { .. })
    }

    /// Get a caller-facing error message
    ///
    /// Configuration errors collapse to a generic message; the variable name
    /// and reason stay in the `Display` output for logs.
    pub fn client_message(&self) -> String {
        match self {
            BracketError::InvalidConfig { .. } => "Invalid bracket configuration".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
