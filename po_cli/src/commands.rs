//! Bracket query commands.

use play_off::{BracketTree, NextMatch, Pairing, ParticipantId, Slot};
use serde::Serialize;
use std::str::FromStr;

/// Query to run against a built bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Finished flag, champion and bracket shape
    Status,
    /// Next match of one participant
    Next(ParticipantId),
    /// Matches waiting for a result
    Pending,
    /// Every bracket position
    Slots,
}

/// Command name that is not recognised
#[derive(Debug, thiserror::Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

/// Command line that does not describe a runnable query
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("missing command, see --help")]
    MissingCommand,

    #[error("missing --bracket FILE")]
    MissingBracket,

    #[error("next requires --participant ID")]
    MissingParticipant,

    #[error("unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<std::ffi::OsString>),
}

/// Command names without arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Status,
    Next,
    Pending,
    Slots,
}

impl FromStr for CommandName {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status" => Ok(CommandName::Status),
            "next" => Ok(CommandName::Next),
            "pending" => Ok(CommandName::Pending),
            "slots" => Ok(CommandName::Slots),
            _ => Err(UnknownCommand(s.to_string())),
        }
    }
}

impl CommandName {
    /// Attach the participant argument, which only `next` requires
    ///
    /// # Errors
    ///
    /// Returns `MissingParticipant` for `next` without a participant.
    pub fn into_command(self, participant: Option<ParticipantId>) -> Result<Command, UsageError> {
        Ok(match self {
            CommandName::Status => Command::Status,
            CommandName::Next => Command::Next(participant.ok_or(UsageError::MissingParticipant)?),
            CommandName::Pending => Command::Pending,
            CommandName::Slots => Command::Slots,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub finished: bool,
    pub champion: Option<ParticipantId>,
    pub slots: usize,
    pub rounds: u32,
    pub pending: usize,
}

#[derive(Debug, Serialize)]
pub struct NextMatchReport {
    pub participant: ParticipantId,
    #[serde(flatten)]
    pub next: NextMatch,
}

#[derive(Debug, Serialize)]
pub struct SlotReport {
    pub index: usize,
    pub round: Option<u32>,
    pub slot: Slot,
}

/// Output of a command
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Status(StatusReport),
    Next(NextMatchReport),
    Pending(Vec<Pairing>),
    Slots(Vec<SlotReport>),
}

impl Command {
    /// Run the query
    ///
    /// # Errors
    ///
    /// `Next` fails with `UnknownParticipant` for ids outside the bracket.
    pub fn run(self, tree: &BracketTree) -> play_off::BracketResult<Report> {
        Ok(match self {
            Command::Status => Report::Status(StatusReport {
                finished: tree.is_finished(),
                champion: tree.champion(),
                slots: tree.leaf_count(),
                rounds: tree.rounds(),
                pending: tree.pending_matches().len(),
            }),
            Command::Next(participant) => Report::Next(NextMatchReport {
                participant,
                next: tree.next_match_for(participant)?,
            }),
            Command::Pending => Report::Pending(tree.pending_matches()),
            Command::Slots => Report::Slots(
                tree.slots()
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(index, &slot)| SlotReport {
                        index,
                        round: tree.round_of(index),
                        slot,
                    })
                    .collect(),
            ),
        })
    }
}
