// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Check, dump and normalize exedit object files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (default: info, -v: debug, -vv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// RON config file, used instead of the one in the working directory
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Reject stray lines instead of skipping them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Process layer items on the current thread only
    #[arg(long, global = true)]
    pub sequential: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and print a summary
    Check {
        /// UTF-8 project file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the parsed object graph as RON
    Dump {
        /// UTF-8 project file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse a file and write it back in canonical form
    Normalize {
        /// UTF-8 project file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short = 'o', long = "output", value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// The input file
    pub fn file(&self) -> &PathBuf {
        match self {
            Command::Check { file } | Command::Dump { file } | Command::Normalize { file, .. } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["exo_tool", "-vv", "check", "a.exo", "--strict"]);
        assert_eq!(args.verbosity, 2);
        assert!(args.strict);
        assert!(!args.sequential);
        assert_eq!(args.command.file(), &PathBuf::from("a.exo"));

        let args = Args::parse_from(["exo_tool", "--sequential", "normalize", "a.exo", "-o", "b.exo"]);
        assert!(args.sequential);
        let Command::Normalize { output, .. } = args.command else {
            panic!("expected normalize");
        };
        assert_eq!(output, Some(PathBuf::from("b.exo")));
    }
}
