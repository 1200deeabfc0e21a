//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};

/// Film library REST service
#[derive(Parser)]
#[command(name = "filmlibrary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Grant the admin role to a registered user
    Promote {
        username: String,

        /// Revoke the admin role instead
        #[arg(long)]
        revoke: bool,
    },

    /// Write a default config.toml if none exists
    Init,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["filmlibrary"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_promote_args() {
        let cli = Cli::try_parse_from(["filmlibrary", "promote", "alice", "--revoke"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Promote {
                username: "alice".to_string(),
                revoke: true
            })
        );
    }
}
