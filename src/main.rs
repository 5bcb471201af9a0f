mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use selic::calculator::{calc_amount, run_example, CalcOptions, CalcRequest, Calculation};
use selic::config::Settings;
use selic::sources::{BcbClient, FileSource, RateSource};
use selic::validation::capital_from_arg;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout only carries results)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings::load(cli.config.as_deref())?;

    let calc = match cli.command {
        Commands::Calc {
            start,
            end,
            capital,
            frequency,
            window,
            save_csv,
            output_dir,
            rates_file,
        } => {
            let request =
                CalcRequest::from_raw(&start, &end, &capital_from_arg(&capital), &frequency)?;
            let options = CalcOptions {
                window_length: window.unwrap_or(settings.window_length),
                save_csv,
                output_dir: output_dir.unwrap_or_else(|| settings.output_dir.clone()),
            };
            let source = build_source(&settings, rates_file)?;
            calc_amount(&request, source.as_ref(), &options)?
        }
        Commands::Example { rates_file } => {
            let options = CalcOptions {
                window_length: settings.window_length,
                ..CalcOptions::default()
            };
            let source = build_source(&settings, rates_file)?;
            run_example(source.as_ref(), &options)?
        }
    };

    print_calculation(&calc, cli.json);
    Ok(())
}

fn build_source(settings: &Settings, rates_file: Option<PathBuf>) -> Result<Box<dyn RateSource>> {
    match rates_file {
        Some(path) => {
            info!("Using offline rates file {}", path.display());
            Ok(Box::new(FileSource::new(path)))
        }
        None => Ok(Box::new(BcbClient::new(settings.api_url.clone())?)),
    }
}

fn print_calculation(calc: &Calculation, json: bool) {
    if json {
        println!("{}", cli::formatters::format_calculation_json(calc));
    } else {
        println!("{}", cli::formatters::format_calculation_table(calc));
    }
}
