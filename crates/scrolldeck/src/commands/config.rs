use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet; showing defaults)".dimmed());
    }
    println!();
    println!("defaults.theme: {}", display(&config.defaults.as_ref().and_then(|d| d.theme.clone())));
    println!(
        "defaults.language: {}",
        display(&config.defaults.as_ref().and_then(|d| d.language.clone()))
    );
    println!(
        "defaults.windowed: {}",
        display(&config.defaults.as_ref().and_then(|d| d.windowed.map(|w| w.to_string())))
    );
    println!("tuning.lookahead_margin: {}", config.lookahead_margin());
    println!("tuning.settle_delay_ms: {}", config.settle_delay_ms());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value} {}",
        "Set".green().bold(),
        format!("({})", path.display()).dimmed()
    );
    Ok(())
}

fn display(value: &Option<String>) -> String {
    match value {
        Some(v) => v.clone(),
        None => "(unset)".dimmed().to_string(),
    }
}
