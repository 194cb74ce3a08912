//! mdcss-report CLI entry point.
//!
//! This binary provides the command-line interface for mdcss-report.

use clap::Parser;
use mdcss_report::cli::{Cli, Commands, PathArgs};
use mdcss_report::reporter::{JsonSummary, SummaryFormatter};
use mdcss_report::{Config, Generator, ReportError, RunSummary};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Config files picked up from the working directory, in order.
const DEFAULT_CONFIG_PATHS: &[&str] = &["mdcss-report.yaml", "mdcss-report.yml", ".mdcss-report.yaml"];

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            eprintln!("Error: {e}");

            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            let code = e
                .downcast_ref::<ReportError>()
                .map_or(1, ReportError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // RUST_LOG wins over the verbosity flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("warn,mdcss_report={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let quiet = cli.quiet;
    let config_path = cli.config.clone();

    match cli.into_command() {
        Commands::Generate(args) => {
            let config = load_config(config_path.as_deref(), &args)?;
            if !quiet && !config.output.json {
                println!("Generating test report and index page...");
            }
            let summary = Generator::new(config.clone()).run()?;
            print_summary(&config, &summary, quiet)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Report(args) => {
            let config = load_config(config_path.as_deref(), &args)?;
            let summary = Generator::new(config.clone()).run_report()?;
            print_summary(&config, &summary, quiet)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Index(args) => {
            let config = load_config(config_path.as_deref(), &args)?;
            let summary = Generator::new(config.clone()).run_index()?;
            print_summary(&config, &summary, quiet)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Init => {
            let config_path = Path::new(DEFAULT_CONFIG_PATHS[0]);
            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, Config::example_yaml())?;
            println!("Created example configuration: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate(args) => match Config::from_file(&args.config) {
            Ok(_) => {
                println!("Configuration is valid: {}", args.config.display());
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Configuration error: {e}");
                Ok(ExitCode::from(1))
            }
        },
    }
}

fn load_config(explicit: Option<&Path>, args: &PathArgs) -> anyhow::Result<Config> {
    let path = explicit.map(Path::to_path_buf).or_else(|| {
        DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    });

    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            Config::from_file(&path)?
        }
        None => {
            tracing::debug!("No configuration file found, using default configuration");
            Config::default()
        }
    };

    config.merge_cli_args(args);
    if !config.output.colored {
        colored::control::set_override(false);
    }

    Ok(config)
}

fn print_summary(config: &Config, summary: &RunSummary, quiet: bool) -> anyhow::Result<()> {
    if config.output.json {
        println!("{}", JsonSummary::new(true).format(summary)?);
    } else if !quiet {
        print!("{}", SummaryFormatter::new(config).format(summary));
    }
    Ok(())
}
