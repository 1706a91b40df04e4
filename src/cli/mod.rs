//! Command-line interface for Blogforge.

mod commands;

use clap::{Parser, Subcommand};

use crate::domain::QuotaTier;

/// Blogforge - AI blog article generator backend
#[derive(Parser)]
#[command(name = "blogforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Show or change a user's generation quota
    Quota {
        /// User id as issued by the identity provider
        user_id: String,
        /// Move the user to another tier
        #[arg(long, value_parser = parse_tier)]
        tier: Option<QuotaTier>,
        /// Zero the generation count
        #[arg(long)]
        reset: bool,
    },

    /// Delete expired keyword suggestion cache rows
    PruneCache,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

fn parse_tier(value: &str) -> Result<QuotaTier, String> {
    value.parse().map_err(|e| format!("{e}"))
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["blogforge"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_quota_flags() {
        let cli =
            Cli::try_parse_from(["blogforge", "quota", "user_1", "--tier", "pro", "--reset"])
                .unwrap();
        match cli.command {
            Some(Commands::Quota {
                user_id,
                tier,
                reset,
            }) => {
                assert_eq!(user_id, "user_1");
                assert_eq!(tier, Some(QuotaTier::Pro));
                assert!(reset);
            }
            _ => panic!("expected quota command"),
        }

        assert!(Cli::try_parse_from(["blogforge", "quota", "u", "--tier", "gold"]).is_err());
    }
}
