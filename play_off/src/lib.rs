//! # Play Off
//!
//! A single-elimination bracket engine built on a flat, heap-ordered array.
//!
//! The engine takes the seeding of a tournament (participants in seed order,
//! with optional byes) and the results recorded so far, and derives the state
//! of every bracket slot in one bottom-up pass. The resulting [`BracketTree`]
//! is immutable: a new result means a new build.
//!
//! ## Core Modules
//!
//! - [`bracket`]: Bracket tree, slot model, configuration and errors
//!
//! ## Example
//!
//! ```
//! use play_off::{BracketTree, NextMatch, ResultMap, Seed};
//!
//! let seeding: Vec<Seed> = (1..=4).map(Seed::Participant).collect();
//! let mut results = ResultMap::new();
//! results.insert((1, 2), 1);
//!
//! let tree = BracketTree::build(&seeding, &results).unwrap();
//! assert!(!tree.is_finished());
//! assert_eq!(tree.next_match_for(2).unwrap(), NextMatch::Lost);
//! ```

/// Single-elimination bracket derivation and queries.
pub mod bracket;
pub use bracket::{
    BracketConfig, BracketError, BracketResult, BracketTree, NextMatch, Pairing, ParticipantId,
    ResultMap, Seed, Slot,
};
