//! Bracket data models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Participant ID type
pub type ParticipantId = u64;

/// Recorded match outcomes.
///
/// Keys are the ordered `(left, right)` pair that occupied a match's two
/// sides when the bracket was built. `(a, b)` and `(b, a)` are different keys.
pub type ResultMap = HashMap<(ParticipantId, ParticipantId), ParticipantId>;

/// Initial value of a leaf position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// A participant placed in this slot
    Participant(ParticipantId),
    /// No participant placed in this slot
    Bye,
}

impl Seed {
    /// Participant placed in this slot, if any
    pub fn participant(self) -> Option<ParticipantId> {
        match self {
            Seed::Participant(id) => Some(id),
            Seed::Bye => None,
        }
    }
}

impl From<ParticipantId> for Seed {
    fn from(id: ParticipantId) -> Self {
        Seed::Participant(id)
    }
}

impl From<Option<ParticipantId>> for Seed {
    fn from(id: Option<ParticipantId>) -> Self {
        id.map_or(Seed::Bye, Seed::Participant)
    }
}

impl From<Seed> for Slot {
    fn from(seed: Seed) -> Self {
        match seed {
            Seed::Participant(id) => Slot::Participant(id),
            Seed::Bye => Slot::Bye,
        }
    }
}

/// Value held by one position of the bracket array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Slot {
    /// Participant currently occupying this position
    Participant(ParticipantId),
    /// Empty seed, or a match between two empty subtrees
    Bye,
    /// Match not decided yet
    Unresolved,
}

impl Slot {
    /// Participant at this position, if any
    pub fn participant(self) -> Option<ParticipantId> {
        match self {
            Slot::Participant(id) => Some(id),
            Slot::Bye | Slot::Unresolved => None,
        }
    }

    /// Whether this position still waits on a match result
    pub fn is_unresolved(self) -> bool {
        self == Slot::Unresolved
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Participant(id) => write!(f, "{id}"),
            Slot::Bye => write!(f, "bye"),
            Slot::Unresolved => write!(f, "TBD"),
        }
    }
}

/// Answer to "what is my next match?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum NextMatch {
    /// The final has been decided
    Finished,
    /// Next opponent is not known yet
    #[serde(rename = "TBD")]
    Tbd,
    /// Next opponent is known and the match awaits a result
    Defined { opponent: ParticipantId },
    /// The participant has been eliminated
    Lost,
}

impl NextMatch {
    /// Opponent of the next match, when it is defined
    pub fn opponent(&self) -> Option<ParticipantId> {
        match self {
            NextMatch::Defined { opponent } => Some(*opponent),
            _ => None,
        }
    }
}

impl std::fmt::Display for NextMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextMatch::Finished => write!(f, "finished"),
            NextMatch::Tbd => write!(f, "TBD"),
            NextMatch::Defined { opponent } => write!(f, "defined (vs {opponent})"),
            NextMatch::Lost => write!(f, "lost"),
        }
    }
}

/// A match whose two sides are both known but whose result is not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Bracket array index of the match
    pub node: usize,
    /// Round number (1 = first round, highest = final)
    pub round: u32,
    /// Participant on the left side
    pub left: ParticipantId,
    /// Participant on the right side
    pub right: ParticipantId,
}

impl Pairing {
    /// Key under which this match's result must be recorded
    pub fn key(&self) -> (ParticipantId, ParticipantId) {
        (self.left, self.right)
    }
}
