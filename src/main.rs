use clap::Parser;
use fruitlist::core::config::{self, CliOverrides};
use fruitlist::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fruitlist", about = "Browse records and add new ones from the terminal")]
struct Args {
    /// Config file (defaults to ~/.fruitlist/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the debug log
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,

    /// Start with no records instead of the seed data
    #[arg(long)]
    empty: bool,

    /// Key that starts a new record, e.g. "ctrl+n" or "f2"
    #[arg(long)]
    new_key: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::options().create(true).append(true).open(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("----------------------------------------------------------------");
    log::info!("fruitlist starting up");

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            new_record_key: args.new_key.as_deref(),
            empty: args.empty,
        },
    );

    if let Err(e) = tui::run(resolved) {
        log::error!("Error running program: {e}");
        eprintln!("Error running program: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
