//! Single-elimination bracket module.
//!
//! This module provides:
//! - The slot model for seeds, byes and undecided matches
//! - Bracket construction from a seeding and a result map
//! - Next-match queries for individual participants
//! - Listing of matches that are ready to be played
//!
//! ## Example
//!
//! ```
//! use play_off::bracket::{BracketTree, NextMatch, ResultMap, Seed};
//!
//! // Participant 1 drew a bye, so it advances without a result
//! let seeding = [Seed::Participant(1), Seed::Bye, Seed::Participant(3), Seed::Participant(4)];
//! let tree = BracketTree::build(&seeding, &ResultMap::new()).unwrap();
//!
//! assert_eq!(tree.next_match_for(1).unwrap(), NextMatch::Tbd);
//! assert_eq!(tree.next_match_for(3).unwrap(), NextMatch::Defined { opponent: 4 });
//!
//! let pending = tree.pending_matches();
//! assert_eq!(pending.len(), 1);
//! assert_eq!(pending[0].key(), (3, 4));
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod tree;

pub use config::BracketConfig;
pub use errors::{BracketError, BracketResult};
pub use models::{NextMatch, Pairing, ParticipantId, ResultMap, Seed, Slot};
pub use tree::BracketTree;
