//! Command-line front end for the play-off bracket engine.
//!
//! Loads a bracket description, builds the tree and prints the answer to
//! one query as JSON on stdout.

mod commands;
mod config;
mod input;

use std::path::PathBuf;
use std::process::exit;

use anyhow::Error;
use commands::{Command, CommandName, UnknownCommand, UsageError};
use config::CliConfig;
use input::{BracketFile, InputError};
use log::info;
use pico_args::Arguments;
use play_off::{BracketError, BracketTree, ParticipantId};

const HELP: &str = "\
Query a single-elimination bracket

USAGE:
  po_cli <COMMAND> --bracket FILE [OPTIONS]

COMMANDS:
  status                   Finished flag, champion and bracket shape
  next                     Next match of the participant given by --participant
  pending                  Matches waiting for a result
  slots                    Every bracket position

OPTIONS:
  --bracket      FILE      Bracket JSON file  [default: env PO_CLI_BRACKET]
  --participant  ID        Participant to query (next)
  --max-slots    N         Largest accepted seeding  [default: env PLAY_OFF_MAX_SLOTS or 4096]

FLAGS:
  --strict                 Reject results that match no pairing
  --pretty                 Pretty-print JSON output
  -h, --help               Print help information

ENVIRONMENT:
  PO_CLI_BRACKET           Bracket JSON file
  PLAY_OFF_STRICT_RESULTS  Reject results that match no pairing (true/false)
  PLAY_OFF_MAX_SLOTS       Largest accepted seeding
  PO_CLI_PRETTY            Pretty-print JSON output (true/false)
  RUST_LOG                 Log filter  [default: warn]

EXIT STATUS:
  0 on success, 2 if the arguments, bracket file or query are invalid, 1 otherwise
";

/// Exit status for invalid bracket data or queries
const EXIT_BAD_REQUEST: i32 = 2;

struct Args {
    command: Command,
    bracket: PathBuf,
    strict: bool,
    pretty: bool,
    max_slots: Option<usize>,
}

fn parse_args() -> Result<Args, Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        exit(0);
    }

    let name = pargs
        .subcommand()?
        .ok_or(UsageError::MissingCommand)?
        .parse::<CommandName>()?;

    let bracket: PathBuf = match pargs.opt_value_from_str("--bracket")? {
        Some(path) => path,
        None => std::env::var("PO_CLI_BRACKET")
            .map(PathBuf::from)
            .map_err(|_| UsageError::MissingBracket)?,
    };

    let participant: Option<ParticipantId> = pargs.opt_value_from_str("--participant")?;

    let args = Args {
        command: name.into_command(participant)?,
        bracket,
        strict: pargs.contains("--strict"),
        pretty: pargs.contains("--pretty"),
        max_slots: pargs.opt_value_from_str("--max-slots")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        return Err(UsageError::UnexpectedArguments(remaining).into());
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), Error> {
    let config = CliConfig::from_env(args.strict, args.max_slots, args.pretty)?;

    let file = BracketFile::load(&args.bracket)?;
    let results = file.result_map()?;
    info!(
        "Loaded bracket from {} ({} slots, {} results)",
        args.bracket.display(),
        file.seeding.len(),
        results.len()
    );

    let tree = BracketTree::build_with_config(&file.seeding, &results, &config.bracket)?;

    let report = args.command.run(&tree)?;
    let output = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}

/// Whether an error was caused by the command line, the bracket file or the
/// query
fn is_bad_request(err: &Error) -> bool {
    if let Some(err) = err.downcast_ref::<BracketError>() {
        return err.is_bad_request();
    }
    if let Some(err) = err.downcast_ref::<InputError>() {
        return err.is_bad_request();
    }
    err.is::<UsageError>() || err.is::<UnknownCommand>() || err.is::<pico_args::Error>()
}

/// Report a failure, exiting with `EXIT_BAD_REQUEST` for bad requests
fn fail(err: Error) -> Result<(), Error> {
    if !is_bad_request(&err) {
        return Err(err);
    }
    match err.downcast_ref::<BracketError>() {
        Some(bracket_err) => eprintln!("Error: {}", bracket_err.client_message()),
        None => eprintln!("Error: {err:#}"),
    }
    exit(EXIT_BAD_REQUEST);
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => return fail(err),
    };

    run(args).or_else(fail)
}
