use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::error;
use registry_demo::manual::build_without_container;
use registry_demo::{run_session, DemoConfig, DemoError, DogAssembler, SessionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    WithContainer,
    WithoutContainer,
}

/// Swipe through a deck of dogs, wired with or without a service registry.
#[derive(Debug, Parser)]
#[command(name = "registry-demo", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of profiles to load (overrides the config file)
    #[arg(short, long)]
    profiles: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = Mode::WithContainer)]
    mode: Mode,

    /// Log level filter, e.g. `debug` (falls back to RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<DemoConfig, DemoError> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(profiles) = cli.profiles {
        config.profile_count = profiles;
    }
    if cli.log_level.is_some() {
        config.log_level.clone_from(&cli.log_level);
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(config: &DemoConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = &config.log_level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn run(cli: &Cli, config: &DemoConfig) -> Result<SessionSummary, DemoError> {
    match cli.mode {
        Mode::WithContainer => {
            let assembler = DogAssembler::new(config.clone())?;
            let controller = assembler.swipe_controller()?;
            run_session(&controller, &config.swipe_pattern)
        }
        Mode::WithoutContainer => {
            let wiring = build_without_container(config)?;
            run_session(&wiring.controller, &config.swipe_pattern)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    match run(&cli, &config) {
        Ok(summary) => match serde_json::to_string(&summary) {
            Ok(json) => {
                println!("{json}");
                println!("woof");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Could not encode session summary: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
