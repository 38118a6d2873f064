//! `firstaid` - CLI for the first-aid guidance core
//!
//! This binary runs the interactive kiosk session and provides commands for
//! printing guides, managing the kit inventory and inspecting configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::Parser;

use firstaid::cli::{Cli, Command, ConfigCommand, GuideCommand, KitCommand, RunCommand};
use firstaid::narration::system;
use firstaid::{get_content, init_logging, runtime, Config, KitInventory, KitItem, Language, Storage};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Config validation is reported by `config validate` itself
    if let Command::Config(ConfigCommand::Validate { file }) = &cli.command {
        return handle_validate(file.clone().or_else(|| cli.config.clone()));
    }

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Run(run_cmd) => handle_run(config, &run_cmd),
        Command::Guide(guide_cmd) => handle_guide(&config, &guide_cmd),
        Command::Kit(kit_cmd) => handle_kit(&config, kit_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, &config_cmd),
    }
}

fn resolve_language(config: &Config, arg: Option<firstaid::cli::LanguageArg>) -> Result<Language> {
    match arg {
        Some(arg) => Ok(arg.into()),
        None => Ok(config.language()?),
    }
}

fn handle_run(mut config: Config, cmd: &RunCommand) -> Result<()> {
    let language = resolve_language(&config, cmd.language)?;
    if cmd.mute {
        config.narration.start_muted = true;
    }
    println!("firstaid {} on {}", env!("CARGO_PKG_VERSION"), system::platform_name());
    println!("Type `tap <view>`, `next`, `back`, `panic`, `lang`, `mute` or `quit`.");
    runtime::run(&config, language)?;
    Ok(())
}

fn handle_guide(config: &Config, cmd: &GuideCommand) -> Result<()> {
    let language = resolve_language(config, cmd.language)?;
    let content = get_content(language);
    let kind = cmd.flow.into();
    let steps = content.steps(kind);

    if cmd.json {
        let guide = serde_json::json!({
            "flow": kind,
            "language": language,
            "direction": language.direction(),
            "title": content.flow_title(kind),
            "steps": steps,
        });
        println!("{}", serde_json::to_string_pretty(&guide)?);
        return Ok(());
    }

    let ui = &content.ui;
    println!("{}", content.flow_title(kind));
    println!("{}", "=".repeat(content.flow_title(kind).chars().count()));
    for (index, step) in steps.iter().enumerate() {
        println!();
        println!("{} {} {} {}: {}", ui.step, index + 1, ui.of, steps.len(), step.title);
        println!("  {}", step.instruction);
        if let Some(warning) = &step.warning {
            println!("  ! {warning}");
        }
        if let Some(seconds) = step.timer_seconds {
            println!("  {}: {:02}:{:02}", ui.cooling_timer, seconds / 60, seconds % 60);
        }
    }
    println!();
    println!("{}", ui.safety_disclaimer);
    Ok(())
}

fn handle_kit(config: &Config, cmd: KitCommand) -> Result<()> {
    let content = get_content(config.language()?);
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open kit storage at {}", path.display()))?;
    let mut kit = KitInventory::load(storage, &content.default_kit);

    match cmd {
        KitCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(kit.items())?);
            } else {
                println!("{}", content.home.kit);
                println!("{}", "-".repeat(content.home.kit.chars().count()));
                for item in kit.items() {
                    println!(
                        "{:>14}  {:<24} x{:<3} {}",
                        item.id, item.name, item.quantity, item.status
                    );
                }
            }
        }
        KitCommand::Add {
            name,
            description,
            status,
            quantity,
        } => {
            let item = KitItem::new(kit.next_id(), name, description, status.into(), quantity);
            let id = item.id.clone();
            kit.upsert(item)?;
            println!("Added item {id}.");
        }
        KitCommand::Remove { id } => match kit.remove(&id)? {
            Some(item) => println!("Removed {} ({id}).", item.name),
            None => bail!("no kit item with id {id}"),
        },
        KitCommand::Reset { yes } => {
            if yes {
                kit.reset(&content.default_kit)?;
                println!("Kit restored to {} default items.", content.default_kit.len());
            } else {
                println!("This will replace the whole kit with the default items.");
                println!("Use --yes to confirm.");
            }
        }
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let language = config.language()?;
    let db_path = config.database_path();
    let speech_available = config.narration.enabled && system::SystemSpeech::new().is_ok();
    let stats = if db_path.exists() {
        Some(Storage::open(&db_path)?.stats()?)
    } else {
        None
    };

    if json {
        let status = serde_json::json!({
            "platform": system::platform_name(),
            "speech_available": speech_available,
            "language": language,
            "direction": language.direction(),
            "database_path": db_path,
            "storage": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("firstaid status");
        println!("---------------");
        println!("Platform:      {}", system::platform_name());
        println!(
            "Speech:        {}",
            if speech_available { "available" } else { "silent" }
        );
        println!("Language:      {language} ({})", language.direction().as_str());
        println!("Database:      {}", db_path.display());
        match stats {
            Some(stats) => {
                println!("Entries:       {}", stats.total_entries);
                println!("Schema:        v{}", stats.schema_version);
                println!("Size:          {} bytes", stats.db_size_bytes);
                if let Some(last_write) = stats.last_write {
                    println!("Last write:    {}", last_write.to_rfc3339());
                }
            }
            None => println!("Storage:       not created yet"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[General]");
                println!("  Language:           {}", config.general.language);
                println!("  Strict language:    {}", config.general.strict_language);
                println!();
                println!("[Navigation]");
                println!(
                    "  Idle timeout (s):   {}",
                    config.navigation.idle_timeout_secs
                );
                println!(
                    "  Panic keys:         {}",
                    config.navigation.panic_keys.join(", ")
                );
                println!();
                println!("[Narration]");
                println!("  Enabled:            {}", config.narration.enabled);
                println!("  Start muted:        {}", config.narration.start_muted);
                println!("  Rate:               {}", config.narration.rate);
                println!("  Guide delay (ms):   {}", config.narration.guide_delay_ms);
                println!("  CPR delay (ms):     {}", config.narration.cpr_delay_ms);
                println!();
                println!("[Guide]");
                println!("  Default timer (s):  {}", config.guide.default_timer_secs);
                println!();
                println!("[CPR]");
                println!("  Rhythm from step:   {}", config.cpr.rhythm_start_step + 1);
                println!("  Rhythm period (ms): {}", config.cpr.rhythm_interval_ms);
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            handle_validate(file.clone())?;
        }
    }
    Ok(())
}

fn handle_validate(file: Option<std::path::PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => println!("Configuration is valid."),
        Err(e) => bail!("configuration error: {e}"),
    }
    Ok(())
}
