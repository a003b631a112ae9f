//! Bracket Walkthrough Example
//!
//! Plays a six-player bracket to completion, rebuilding the tree after each
//! round of results and printing what every participant plays next.

use play_off::{BracketTree, ResultMap, Seed};

fn main() {
    println!("=== Single-Elimination Walkthrough ===\n");

    // Top two seeds receive byes
    let seeding = vec![
        Seed::Participant(1),
        Seed::Bye,
        Seed::Participant(4),
        Seed::Participant(5),
        Seed::Participant(2),
        Seed::Bye,
        Seed::Participant(3),
        Seed::Participant(6),
    ];
    let mut results = ResultMap::new();

    let mut round = 1;
    loop {
        let tree = BracketTree::build(&seeding, &results).expect("seeding is valid");
        if tree.is_finished() {
            println!("Champion: {}", tree.champion().unwrap_or_default());
            break;
        }

        println!("Before round {round}:");
        for id in 1..=6 {
            let next = tree.next_match_for(id).expect("id is seeded");
            println!("  participant {id}: {next}");
        }

        // Lower id wins every match
        for pairing in tree.pending_matches() {
            let winner = pairing.left.min(pairing.right);
            println!("  recording {:?} -> {}", pairing.key(), winner);
            results.insert(pairing.key(), winner);
        }
        println!();
        round += 1;
    }
}
