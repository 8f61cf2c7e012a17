use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Elite Squad ASCEND evaluation backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Reset the database schema and seed the built-in game modes
    Setup,
    /// Register a player
    AddPlayer {
        nickname: String,
        #[arg(short, long, default_value_t = 1)]
        level: i32,
    },
    /// Print a player's ASCEND card, creating a default one if needed
    Show {
        player_id: i64,
        #[arg(short, long)]
        gamemode: Option<String>,
    },
    /// Import scores from JSON or "Name:Value,Name:Value" text
    Import {
        player_id: i64,
        data: String,
        #[arg(short, long)]
        gamemode: Option<String>,
        #[arg(short, long)]
        evaluator: Option<String>,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Print evaluation history, newest first
    History {
        player_id: i64,
        #[arg(short, long)]
        gamemode: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
}
