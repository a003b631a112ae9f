//! Heap-ordered bracket tree.
//!
//! The bracket is stored as a flat array of `2L` slots for `L` leaves:
//! index 0 is unused, `1..L` are the matches (index 1 is the final) and
//! `L..2L` are the seeds. Node `i` has children `2i` and `2i + 1`.

use super::config::BracketConfig;
use super::errors::{BracketError, BracketResult};
use super::models::{NextMatch, Pairing, ParticipantId, ResultMap, Seed, Slot};
use log::{debug, warn};
use std::collections::HashSet;

const ROOT: usize = 1;

#[inline]
fn left(index: usize) -> usize {
    index * 2
}

#[inline]
fn right(index: usize) -> usize {
    index * 2 + 1
}

#[inline]
fn parent(index: usize) -> usize {
    index / 2
}

/// Other child of the same parent. Undefined for the root.
#[inline]
fn sibling(index: usize) -> usize {
    index ^ 1
}

/// Single-elimination bracket derived from a seeding and recorded results
///
/// A tree is never updated in place. When a result is recorded, build a new
/// tree from the same seeding and the extended result map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTree {
    slots: Vec<Slot>,
    leaves: usize,
}

impl BracketTree {
    /// Build a bracket with the default configuration
    ///
    /// # Arguments
    ///
    /// * `seeding` - Leaf values in seed order; length must be a power of two
    /// * `results` - Winners keyed by the ordered `(left, right)` pairing
    ///
    /// # Errors
    ///
    /// See [`BracketTree::build_with_config`].
    pub fn build(seeding: &[Seed], results: &ResultMap) -> BracketResult<Self> {
        Self::build_with_config(seeding, results, &BracketConfig::default())
    }

    /// Build a bracket
    ///
    /// Every match is computed once, bottom-up, after both of its children:
    /// two participants take the recorded winner (or stay unresolved), a bye
    /// on either side lets the other side through, anything else stays
    /// unresolved.
    ///
    /// # Errors
    ///
    /// - `InvalidSeedingSize` if the seeding is empty or not a power of two
    /// - `TooManySlots` if the seeding exceeds `config.max_slots`
    /// - `DuplicateParticipant` if a participant is seeded twice
    /// - `InvalidWinner` if a recorded winner did not play the match
    /// - `UnmatchedResult` if `config.strict_results` is set and a result
    ///   was not used by any match
    pub fn build_with_config(
        seeding: &[Seed],
        results: &ResultMap,
        config: &BracketConfig,
    ) -> BracketResult<Self> {
        let leaves = seeding.len();

        if !leaves.is_power_of_two() {
            warn!("Rejected seeding of size {}", leaves);
            return Err(BracketError::InvalidSeedingSize(leaves));
        }

        if leaves > config.max_slots {
            warn!(
                "Rejected seeding of size {} (max {})",
                leaves, config.max_slots
            );
            return Err(BracketError::TooManySlots {
                len: leaves,
                max: config.max_slots,
            });
        }

        let mut seen = HashSet::with_capacity(leaves);
        for id in seeding.iter().filter_map(|seed| seed.participant()) {
            if !seen.insert(id) {
                warn!("Participant {} seeded more than once", id);
                return Err(BracketError::DuplicateParticipant(id));
            }
        }

        let mut slots = vec![Slot::Unresolved; leaves];
        slots.extend(seeding.iter().copied().map(Slot::from));

        let mut applied = HashSet::with_capacity(results.len());
        for index in (ROOT..leaves).rev() {
            slots[index] = match (slots[left(index)], slots[right(index)]) {
                (Slot::Participant(l), Slot::Participant(r)) => match results.get(&(l, r)) {
                    Some(&winner) if winner == l || winner == r => {
                        applied.insert((l, r));
                        Slot::Participant(winner)
                    }
                    Some(&winner) => {
                        warn!("Winner {} did not play match ({}, {})", winner, l, r);
                        return Err(BracketError::InvalidWinner {
                            left: l,
                            right: r,
                            winner,
                        });
                    }
                    None => Slot::Unresolved,
                },
                (Slot::Bye, other) | (other, Slot::Bye) => other,
                _ => Slot::Unresolved,
            };
        }

        if applied.len() < results.len() {
            let mut unused: Vec<_> = results
                .keys()
                .filter(|key| !applied.contains(*key))
                .copied()
                .collect();
            unused.sort_unstable();

            if config.strict_results {
                let (left, right) = unused[0];
                warn!("Result for ({}, {}) matches no pairing", left, right);
                return Err(BracketError::UnmatchedResult { left, right });
            }

            for (left, right) in unused {
                debug!("Ignoring result for ({}, {}): no such pairing", left, right);
            }
        }

        debug!(
            "Built bracket with {} slots, {} of {} results applied",
            leaves,
            applied.len(),
            results.len()
        );

        Ok(Self { slots, leaves })
    }

    /// Whether the final has been decided
    pub fn is_finished(&self) -> bool {
        matches!(self.slots[ROOT], Slot::Participant(_))
    }

    /// Winner of the final, once decided
    pub fn champion(&self) -> Option<ParticipantId> {
        self.slots[ROOT].participant()
    }

    /// Next match for a participant
    ///
    /// Once the final is decided this returns [`NextMatch::Finished`] for
    /// every participant of the bracket, including those eliminated earlier.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParticipant` if `id` is not part of this bracket.
    pub fn next_match_for(&self, id: ParticipantId) -> BracketResult<NextMatch> {
        if self.is_finished() {
            return Ok(NextMatch::Finished);
        }

        // Ascending scan finds the most advanced position first.
        let index = self
            .slots
            .iter()
            .skip(ROOT)
            .position(|slot| *slot == Slot::Participant(id))
            .map(|offset| offset + ROOT)
            .ok_or(BracketError::UnknownParticipant(id))?;

        if !self.slots[parent(index)].is_unresolved() {
            return Ok(NextMatch::Lost);
        }

        Ok(match self.slots[sibling(index)] {
            Slot::Participant(opponent) => NextMatch::Defined { opponent },
            Slot::Unresolved | Slot::Bye => NextMatch::Tbd,
        })
    }

    /// Matches whose two sides are known and whose result is not recorded
    ///
    /// Returned in ascending node order. [`Pairing::key`] is the exact key
    /// under which the result has to be recorded.
    pub fn pending_matches(&self) -> Vec<Pairing> {
        (ROOT..self.leaves)
            .filter(|&node| self.slots[node].is_unresolved())
            .filter_map(|node| {
                match (self.slots[left(node)], self.slots[right(node)]) {
                    (Slot::Participant(left), Slot::Participant(right)) => Some(Pairing {
                        node,
                        round: self.round_at(node),
                        left,
                        right,
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    /// Number of seed slots
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of rounds, the final included
    pub fn rounds(&self) -> u32 {
        self.leaves.trailing_zeros()
    }

    /// Round played at a match node (1 = first round)
    ///
    /// Returns `None` for leaves and out-of-range indices.
    pub fn round_of(&self, index: usize) -> Option<u32> {
        (ROOT..self.leaves)
            .contains(&index)
            .then(|| self.round_at(index))
    }

    /// Slot at a 1-based bracket index
    pub fn slot(&self, index: usize) -> Option<Slot> {
        if index < ROOT {
            return None;
        }
        self.slots.get(index).copied()
    }

    /// The whole bracket array. Index 0 is filler.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn round_at(&self, node: usize) -> u32 {
        self.rounds() - node.ilog2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds(values: &[Option<ParticipantId>]) -> Vec<Seed> {
        values.iter().copied().map(Seed::from).collect()
    }

    fn results(entries: &[((ParticipantId, ParticipantId), ParticipantId)]) -> ResultMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_array_layout() {
        let seeding = seeds(&[Some(1), Some(2), Some(3), Some(4)]);
        let tree = BracketTree::build(&seeding, &ResultMap::new()).unwrap();

        assert_eq!(tree.slots().len(), 8);
        assert_eq!(tree.slot(0), None);
        assert_eq!(tree.slot(1), Some(Slot::Unresolved));
        assert_eq!(tree.slot(4), Some(Slot::Participant(1)));
        assert_eq!(tree.slot(7), Some(Slot::Participant(4)));
        assert_eq!(tree.slot(8), None);
    }

    #[test]
    fn test_index_helpers() {
        assert_eq!(left(3), 6);
        assert_eq!(right(3), 7);
        assert_eq!(parent(6), 3);
        assert_eq!(parent(7), 3);
        assert_eq!(sibling(6), 7);
        assert_eq!(sibling(7), 6);
    }

    #[test]
    fn test_winner_advances_to_parent() {
        let tree = BracketTree::build(
            &seeds(&[Some(1), Some(2), Some(3), Some(4)]),
            &results(&[((3, 4), 4)]),
        )
        .unwrap();

        assert_eq!(tree.slot(3), Some(Slot::Participant(4)));
        assert_eq!(tree.slot(2), Some(Slot::Unresolved));
    }

    #[test]
    fn test_double_bye_propagates() {
        let tree = BracketTree::build(&seeds(&[Some(1), Some(2), None, None]), &ResultMap::new())
            .unwrap();

        assert_eq!(tree.slot(3), Some(Slot::Bye));
        assert_eq!(tree.slot(1), Some(Slot::Unresolved));

        let tree = BracketTree::build(
            &seeds(&[Some(1), Some(2), None, None]),
            &results(&[((1, 2), 2)]),
        )
        .unwrap();
        assert!(tree.is_finished());
        assert_eq!(tree.champion(), Some(2));
    }

    #[test]
    fn test_bye_against_unresolved_stays_unresolved() {
        let seeding = seeds(&[
            Some(1),
            Some(2),
            Some(3),
            Some(4),
            None,
            None,
            None,
            None,
        ]);
        let tree = BracketTree::build(&seeding, &ResultMap::new()).unwrap();

        assert_eq!(tree.slot(3), Some(Slot::Bye));
        assert_eq!(tree.slot(2), Some(Slot::Unresolved));
        assert_eq!(tree.slot(1), Some(Slot::Unresolved));
    }

    #[test]
    fn test_single_slot_bracket() {
        let tree = BracketTree::build(&seeds(&[Some(5)]), &ResultMap::new()).unwrap();
        assert!(tree.is_finished());
        assert_eq!(tree.champion(), Some(5));
        assert_eq!(tree.rounds(), 0);
        assert_eq!(tree.next_match_for(5).unwrap(), NextMatch::Finished);

        let empty = BracketTree::build(&seeds(&[None]), &ResultMap::new()).unwrap();
        assert!(!empty.is_finished());
        assert_eq!(
            empty.next_match_for(5).unwrap_err(),
            BracketError::UnknownParticipant(5)
        );
    }

    #[test]
    fn test_invalid_sizes() {
        for len in [0, 3, 6, 12] {
            let seeding = vec![Seed::Bye; len];
            assert_eq!(
                BracketTree::build(&seeding, &ResultMap::new()).unwrap_err(),
                BracketError::InvalidSeedingSize(len)
            );
        }
    }

    #[test]
    fn test_too_many_slots() {
        let config = BracketConfig {
            strict_results: false,
            max_slots: 4,
        };
        let seeding: Vec<Seed> = (0..8).map(Seed::Participant).collect();
        assert_eq!(
            BracketTree::build_with_config(&seeding, &ResultMap::new(), &config).unwrap_err(),
            BracketError::TooManySlots { len: 8, max: 4 }
        );
    }

    #[test]
    fn test_duplicate_participant() {
        let err = BracketTree::build(&seeds(&[Some(1), Some(2), Some(1), None]), &ResultMap::new())
            .unwrap_err();
        assert_eq!(err, BracketError::DuplicateParticipant(1));
    }

    #[test]
    fn test_invalid_winner() {
        let err = BracketTree::build(
            &seeds(&[Some(1), Some(2), Some(3), Some(4)]),
            &results(&[((1, 2), 3)]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BracketError::InvalidWinner {
                left: 1,
                right: 2,
                winner: 3
            }
        );
    }

    #[test]
    fn test_unused_result_lenient_and_strict() {
        let seeding = seeds(&[Some(1), Some(2), Some(3), Some(4)]);
        let recorded = results(&[((1, 2), 1), ((4, 3), 4), ((2, 1), 2)]);

        let tree = BracketTree::build(&seeding, &recorded).unwrap();
        assert_eq!(tree.slot(2), Some(Slot::Participant(1)));
        assert_eq!(tree.slot(3), Some(Slot::Unresolved));

        let err = BracketTree::build_with_config(&seeding, &recorded, &BracketConfig::strict())
            .unwrap_err();
        assert_eq!(err, BracketError::UnmatchedResult { left: 2, right: 1 });
    }

    #[test]
    fn test_strict_accepts_fully_consumed_results() {
        let seeding = seeds(&[Some(1), Some(2), Some(3), Some(4)]);
        let recorded = results(&[((1, 2), 1), ((3, 4), 3), ((1, 3), 3)]);

        let tree =
            BracketTree::build_with_config(&seeding, &recorded, &BracketConfig::strict()).unwrap();
        assert_eq!(tree.champion(), Some(3));
    }

    #[test]
    fn test_round_numbering() {
        let seeding: Vec<Seed> = (0..8).map(Seed::Participant).collect();
        let tree = BracketTree::build(&seeding, &ResultMap::new()).unwrap();

        assert_eq!(tree.rounds(), 3);
        assert_eq!(tree.round_of(1), Some(3));
        assert_eq!(tree.round_of(2), Some(2));
        assert_eq!(tree.round_of(3), Some(2));
        assert_eq!(tree.round_of(4), Some(1));
        assert_eq!(tree.round_of(7), Some(1));
        assert_eq!(tree.round_of(8), None);
        assert_eq!(tree.round_of(0), None);
    }

    #[test]
    fn test_pending_matches_skip_byes_and_decided() {
        let tree = BracketTree::build(
            &seeds(&[Some(1), None, Some(3), Some(4), Some(5), Some(6), Some(7), Some(8)]),
            &results(&[((5, 6), 6)]),
        )
        .unwrap();

        let keys: Vec<_> = tree.pending_matches().iter().map(Pairing::key).collect();
        assert_eq!(keys, vec![(3, 4), (7, 8)]);
        assert!(tree.pending_matches().iter().all(|p| p.round == 1));
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BracketTree>();
    }
}
