use clap::Parser;
use chrono::Local;
use sobriety::application::{RecordStore, SystemClock};
use sobriety::cli::{format_config_list, format_status, Cli, Commands};
use sobriety::domain::{start_of_day, DateInput};
use sobriety::error::{Result, SobrietyError};
use sobriety::infrastructure::{Config, JsonFileStorage, LoggingConfig, ShareSession};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loaded = Config::resolve_data_dir(cli.data_dir.as_deref())
        .and_then(|dir| Config::load_from_dir(&dir).map(|config| (dir, config)));

    // Logging comes up before config errors are reported
    match &loaded {
        Ok((_, config)) => LoggingConfig::new(&config.log_level, &config.log_format),
        Err(_) => LoggingConfig::default(),
    }
    .verbose(cli.verbose)
    .init();

    let (data_dir, config) = loaded?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        None | Some(Commands::Status) => {
            let store = open_store(&data_dir, &config);
            let start = store.record().start_date.with_timezone(&Local).date_naive();
            print!("{}", format_status(start, &store.summary()));
            Ok(())
        }
        Some(Commands::Relapse { yes }) => {
            if !yes {
                return Err(SobrietyError::ConfirmationRequired(
                    "log a relapse".to_string(),
                ));
            }

            let mut store = open_store(&data_dir, &config);
            store.log_relapse();
            ensure_saved(&mut store)?;
            println!("Relapse logged. Your streak restarts from today.");
            Ok(())
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                return Err(SobrietyError::ConfirmationRequired(
                    "reset all sobriety data".to_string(),
                ));
            }

            let mut store = open_store(&data_dir, &config);
            store.reset();
            ensure_saved(&mut store)?;
            println!("Tracker reset. Starting fresh from today.");
            Ok(())
        }
        Some(Commands::StartDate { date }) => {
            let today = Local::now().date_naive();
            let date = DateInput::parse(&date)?.resolve(today)?;

            let mut store = open_store(&data_dir, &config);
            store.update_start_date(start_of_day(date, &Local));
            ensure_saved(&mut store)?;
            println!("Start date set to {}", date.format("%b %-d, %Y"));
            Ok(())
        }
        Some(Commands::Export { dir, share }) => {
            let dir = dir.unwrap_or_else(|| config.export_dir());

            let mut store = open_store(&data_dir, &config);
            let path = store.export_summary(&dir)?;
            println!("Sobriety data exported to: {}", path.display());

            if share && store.export_state().share_ready {
                let command = config.share_command.clone().ok_or_else(|| {
                    SobrietyError::Share("No share command configured".to_string())
                })?;
                ShareSession::new(command).share(&path)?;
                store.acknowledge_share();
            }
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let mut config = config;

            if list {
                print!("{}", format_config_list(&config.entries()));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    config.set(&k, &v)?;
                    config.save_to_dir(&data_dir)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", config.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: sobriety config [--list | <key> [<value>]]");
                println!("Valid keys: data_file, export_dir, share_command, log_level, log_format");
                Ok(())
            }
        }
    }
}

fn open_store(data_dir: &Path, config: &Config) -> RecordStore<JsonFileStorage> {
    let path = data_dir.join(&config.data_file);
    let store = RecordStore::open(JsonFileStorage::new(path), SystemClock);

    if let Some(moved) = store.quarantined() {
        eprintln!(
            "Warning: saved data could not be read and was moved to {}",
            moved.display()
        );
    }

    store
}

/// Retry a failed save once so the user hears about data that did not persist
fn ensure_saved(store: &mut RecordStore<JsonFileStorage>) -> Result<()> {
    if store.is_dirty() {
        store.save()?;
    }
    Ok(())
}
