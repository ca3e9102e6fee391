mod args;
mod commands;

use std::fs::File;
use std::process::ExitCode;

use takelog_core::config::Config;
use takelog_core::state::{AppState, SqliteStore};

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("takelog")
        .join("takelog.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(log_file) = File::create(&log_path).or_else(|_| File::create(std::env::temp_dir().join("takelog.log"))) else {
        return;
    };
    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        return;
    }

    log::info!("takelog starting (log level: {:?})", log_level);
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if argv.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", args::USAGE);
        return ExitCode::SUCCESS;
    }

    let cli = match args::parse(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("takelog: {}\n\n{}", e, args::USAGE);
            return ExitCode::from(2);
        }
    };
    init_logging(cli.verbose);

    let config = Config::load();
    let db_path = cli.db.clone().unwrap_or_else(|| config.storage_path());
    let mut store = match SqliteStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("cannot open {}: {}", db_path.display(), e);
            eprintln!("takelog: cannot open {}: {}", db_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("store at {}", db_path.display());

    let mut state = AppState::load(&config, &store);
    match commands::run(cli.command, &mut state, &mut store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("takelog: {}", e);
            ExitCode::FAILURE
        }
    }
}
