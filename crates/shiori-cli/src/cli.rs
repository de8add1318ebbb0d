use std::path::PathBuf;

use chrono::Weekday;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "shiori",
    version,
    about = "Fetch anime site sections from a backend and print the rendered markup"
)]
pub struct Cli {
    /// Config file (defaults to the user config, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backend origin from the config
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every home-page section
    Home,
    /// Render the airing schedule
    Schedule {
        /// Weekday to show instead of today (mon, tue, ...)
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Render the suggestion dropdown for a query
    Suggest { query: String },
    /// Resolve the stream of an episode
    Watch {
        anime_id: String,
        #[arg(long, default_value = "1")]
        ep: String,
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        dub: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watch() {
        let cli = Cli::parse_from([
            "shiori", "watch", "frieren-18542", "--ep", "5", "--dub", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Watch {
                anime_id, ep, server, dub,
            } => {
                assert_eq!(anime_id, "frieren-18542");
                assert_eq!(ep, "5");
                assert_eq!(server, None);
                assert!(dub);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_schedule_day() {
        let cli = Cli::parse_from(["shiori", "--base-url", "http://localhost:5000", "schedule", "--day", "fri"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:5000"));
        assert!(matches!(cli.command, Command::Schedule { day: Some(Weekday::Fri) }));
        assert!(Cli::try_parse_from(["shiori", "schedule", "--day", "someday"]).is_err());
    }
}
