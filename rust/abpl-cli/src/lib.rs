//! The `abpl` command-line front end.
//!
//! Every subcommand works on one sentence from the command line, or on
//! sentences read from stdin one per line until `exit`. Output goes to any
//! [`Write`], so the whole front end can be driven from tests.

use std::io::{BufRead, Write};

use abpl_assistant::{
    CommandAssistant, Dispatched, Dispatcher, FareTable, MemoryBookingStore, TurnLog,
};
use abpl_lang::{CommandTree, Interpreter, Outcome, Rejection};
use anyhow::Result;
use serde_json::json;
use tracing::{debug, warn};

pub mod cli;

pub use cli::{AbplCli, Command};

/// Typed at the prompt to end a session.
const EXIT: &str = "exit";

/// Run `cli` against `input`, writing results to `out`.
///
/// Returns `true` when every sentence got through the requested stage.
pub fn run(
    cli: &AbplCli,
    interpreter: &Interpreter,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    if let Command::Chat { history } = &cli.command {
        let log = match history {
            Some(path) if path.exists() => TurnLog::from_jsonl(&std::fs::read_to_string(path)?)?,
            _ => TurnLog::new(),
        };
        let (log, all_passed) = chat(interpreter, log, input, out)?;
        if let Some(path) = history {
            std::fs::write(path, log.to_jsonl()?)?;
        }
        return Ok(all_passed);
    }

    if let Some(sentence) = cli.command.sentence() {
        return report(interpreter, &cli.command, cli.json, sentence, out);
    }

    let mut all_passed = true;
    for sentence in sentences(input) {
        all_passed &= report(interpreter, &cli.command, cli.json, &sentence?, out)?;
    }
    Ok(all_passed)
}

/// Non-empty trimmed lines of `input`, up to the first `exit`.
fn sentences(input: impl BufRead) -> impl Iterator<Item = std::io::Result<String>> {
    input
        .lines()
        .map(|line| line.map(|line| line.trim().to_string()))
        .filter(|line| !matches!(line, Ok(line) if line.is_empty()))
        .take_while(|line| !matches!(line, Ok(line) if line.eq_ignore_ascii_case(EXIT)))
}

/// Print the result of one stage for one sentence.
pub fn report(
    interpreter: &Interpreter,
    command: &Command,
    json: bool,
    sentence: &str,
    out: &mut impl Write,
) -> Result<bool> {
    debug!(sentence, "reporting");
    match command {
        Command::Lex { .. } => lex(interpreter, json, sentence, out),
        Command::Parse { .. } => {
            let parsed = interpreter.parse(sentence);
            if json {
                match &parsed {
                    Ok(tree) => writeln!(out, "{}", serde_json::to_string(tree)?)?,
                    Err(rejection) => writeln!(out, "{}", serde_json::to_string(rejection)?)?,
                }
            } else {
                match &parsed {
                    Ok(tree) => write_tree(out, "parsed", tree)?,
                    Err(rejection) => write_rejection(out, rejection)?,
                }
            }
            Ok(parsed.is_ok())
        }
        Command::Check { .. } | Command::Chat { .. } => {
            let outcome = interpreter.interpret(sentence);
            if json {
                writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
            } else {
                match &outcome {
                    Outcome::Accepted(tree) => write_tree(out, "accepted", tree)?,
                    Outcome::Rejected(rejection) => write_rejection(out, rejection)?,
                }
            }
            Ok(outcome.is_accepted())
        }
    }
}

fn lex(
    interpreter: &Interpreter,
    json: bool,
    sentence: &str,
    out: &mut impl Write,
) -> Result<bool> {
    let (tokens, errors): (Vec<_>, Vec<_>) = interpreter.lex(sentence).partition(Result::is_ok);
    let tokens: Vec<_> = tokens.into_iter().filter_map(Result::ok).collect();
    let errors: Vec<_> = errors.into_iter().filter_map(Result::err).collect();

    if json {
        writeln!(out, "{}", json!({ "tokens": tokens, "errors": errors }))?;
    } else {
        for token in &tokens {
            writeln!(out, "{:>4}  {:<20} {}", token.position, token.kind.name(), token.text)?;
        }
        for error in &errors {
            writeln!(out, "error: {error}")?;
        }
    }
    Ok(errors.is_empty())
}

fn write_tree(out: &mut impl Write, verdict: &str, tree: &CommandTree) -> Result<()> {
    writeln!(out, "{verdict} {}", tree.shape())?;
    for (name, text) in tree.pairs() {
        writeln!(out, "  {name:<14} {text}")?;
    }
    Ok(())
}

fn write_rejection(out: &mut impl Write, rejection: &Rejection) -> Result<()> {
    writeln!(
        out,
        "rejected ({}) at {}: {rejection}",
        rejection.kind(),
        rejection.position()
    )?;
    Ok(())
}

/// Converse with the built-in assistant until `exit`, returning the
/// extended transcript and whether every sentence was understood and its
/// action carried out.
pub fn chat(
    interpreter: &Interpreter,
    mut log: TurnLog,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(TurnLog, bool)> {
    let assistant = CommandAssistant::new(interpreter.clone());
    let dispatcher = Dispatcher::new(MemoryBookingStore::default(), FareTable::new());
    let mut all_passed = true;

    for sentence in sentences(input) {
        let sentence = sentence?;
        all_passed &= interpreter.interpret(&sentence).is_accepted();
        match dispatcher.converse(&assistant, &log, &sentence) {
            Ok(exchange) => {
                writeln!(out, "{}", exchange.reply.message)?;
                if !matches!(exchange.dispatched, Dispatched::Nothing) {
                    writeln!(out, "{}", exchange.dispatched)?;
                }
                log = exchange.log;
            }
            Err(error) => {
                warn!(%error, "action failed");
                writeln!(out, "error: {error}")?;
                all_passed = false;
            }
        }
    }
    Ok((log, all_passed))
}
