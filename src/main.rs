use anyhow::Result;

use elite_squad_ascend::cli::Command;
use elite_squad_ascend::{
    handle_add_player, handle_history, handle_import, handle_serve, handle_setup, handle_show, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Setup => handle_setup(),
        Command::AddPlayer { nickname, level } => handle_add_player(nickname, *level),
        Command::Show { player_id, gamemode } => handle_show(*player_id, gamemode.as_deref()),
        Command::Import {
            player_id,
            data,
            gamemode,
            evaluator,
            comment,
        } => handle_import(
            *player_id,
            data,
            gamemode.as_deref(),
            evaluator.as_deref(),
            comment.as_deref(),
        ),
        Command::History {
            player_id,
            gamemode,
            limit,
        } => handle_history(*player_id, gamemode.as_deref(), *limit),
    }
}
