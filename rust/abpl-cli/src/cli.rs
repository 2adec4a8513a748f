use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "abpl")]
#[command(bin_name = "abpl")]
#[command(about = "Interpret ABPL travel-booking sentences", long_about = None)]
pub struct AbplCli {
    /// Print tokens, trees and rejections as JSON, one document per line
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter such as "debug" or "abpl_lang=trace"; overrides ABPL_LOG
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the tokens of a sentence and any unrecognized characters
    Lex { sentence: Option<String> },

    /// Print the command tree of a sentence without validating it
    Parse { sentence: Option<String> },

    /// Run the full pipeline; exits with status 1 if a sentence is rejected
    Check { sentence: Option<String> },

    /// Talk to the built-in assistant, reading sentences from stdin; exits
    /// with status 1 if a sentence is not understood or its action fails
    Chat {
        /// Transcript to resume from and write back to
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

impl Command {
    /// The sentence given on the command line, if any.
    pub fn sentence(&self) -> Option<&str> {
        match self {
            Command::Lex { sentence } | Command::Parse { sentence } | Command::Check { sentence } => {
                sentence.as_deref()
            }
            Command::Chat { .. } => None,
        }
    }
}
