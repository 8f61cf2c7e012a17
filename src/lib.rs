pub mod api;
pub mod ascend;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use serde_json::Value;

use crate::ascend::{EvaluationRecord, HistoryEntry};
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::ascend::AscendService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_service(config: &AppConfig) -> Result<AscendService> {
    let pool = database::create_pool(&config.server.database_path)?;
    Ok(AscendService::new(pool, config.ascend.clone()))
}

fn resolve_mode(config: &AppConfig, gamemode: Option<&str>) -> String {
    gamemode
        .unwrap_or(config.ascend.default_game_mode)
        .to_string()
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_setup() -> Result<()> {
    let config = AppConfig::new();
    let seeded = open_service(&config)?.reset()?;
    println!(
        "{} {} ready with {} game modes",
        "✓".green(),
        config.server.database_path.bold(),
        seeded
    );
    Ok(())
}

pub fn handle_add_player(nickname: &str, level: i32) -> Result<()> {
    let config = AppConfig::new();
    let player = open_service(&config)?.register_player(nickname, level)?;
    println!("{} Registered {} with id {}", "✓".green(), player.nickname.bold(), player.id);
    Ok(())
}

pub fn handle_show(player_id: i64, gamemode: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let gamemode = resolve_mode(&config, gamemode);
    let record = open_service(&config)?.get_or_create(player_id, &gamemode)?;
    print_record(&record)
}

pub fn handle_import(
    player_id: i64,
    data: &str,
    gamemode: Option<&str>,
    evaluator: Option<&str>,
    comment: Option<&str>,
) -> Result<()> {
    let config = AppConfig::new();
    let gamemode = resolve_mode(&config, gamemode);
    let outcome = open_service(&config)?.import_scores(
        player_id,
        &gamemode,
        &Value::String(data.to_string()),
        evaluator.map(String::from),
        comment.map(String::from),
    )?;

    if outcome.imported_fields.is_empty() {
        println!("{} No field matched a {} skill", "!".yellow(), gamemode);
    } else {
        println!("{} Imported {}", "✓".green(), outcome.imported_fields.join(", "));
    }
    print_record(&outcome.record)
}

pub fn handle_history(player_id: i64, gamemode: Option<&str>, limit: Option<usize>) -> Result<()> {
    let config = AppConfig::new();
    let gamemode = resolve_mode(&config, gamemode);
    let entries = open_service(&config)?.history(player_id, &gamemode, limit)?;

    if entries.is_empty() {
        println!("No evaluations for player {} in {}", player_id, gamemode);
    }
    for entry in &entries {
        println!("{}", format_history_line(entry));
    }
    Ok(())
}

fn print_record(record: &EvaluationRecord) -> Result<()> {
    println!(
        "{} {} | overall {} | rank #{}",
        record.gamemode.bold(),
        record.player_id,
        record.overall_tier.to_string().yellow().bold(),
        record.global_rank.unwrap_or_default()
    );
    for slot in &record.skills {
        println!("  {:<16} {:>3}/100  {}", slot.name, slot.score, slot.tier);
    }
    println!("{}", serde_json::to_string_pretty(&record.view())?);
    Ok(())
}

fn format_history_line(entry: &HistoryEntry) -> String {
    let change = match entry.old_overall_tier {
        Some(old) => format!("{} -> {}", old, entry.new_overall_tier),
        None => format!("New: {}", entry.new_overall_tier),
    };
    format!(
        "{}  {:<9}  {}",
        entry.created_at.format("%d.%m.%Y %H:%M"),
        entry.change_type.as_str(),
        change
    )
}
