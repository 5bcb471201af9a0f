use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "selic")]
#[command(version, about = "Compound interest over the Brazilian Selic daily rate")]
#[command(
    long_about = "Compound a capital amount over the daily Selic rate published by the Banco Central do Brasil, and find the best fixed-length window to have invested in."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compound a capital amount over a date range
    Calc {
        /// First day of the investment (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day of the investment (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Capital invested (a number, e.g. 657.43)
        #[arg(long, allow_hyphen_values = true)]
        capital: String,

        /// Output sampling: day, daily, month or year
        #[arg(short, long, default_value = "day")]
        frequency: String,

        /// Records per window in the best-window search (at least 1)
        #[arg(short, long, value_parser = parse_window_length)]
        window: Option<usize>,

        /// Write solution.csv and df_raw.csv (existing files are kept)
        #[arg(long)]
        save_csv: bool,

        /// Directory for CSV output
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Read the rate series from a saved BCB JSON response instead of the API
        #[arg(long)]
        rates_file: Option<PathBuf>,
    },

    /// Run the built-in example (2010-01-11 to 2021-03-01, capital 657.43, daily)
    Example {
        /// Read the rate series from a saved BCB JSON response instead of the API
        #[arg(long)]
        rates_file: Option<PathBuf>,
    },
}

fn parse_window_length(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("window length must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_calc_command() {
        let cli = Cli::try_parse_from([
            "selic",
            "--no-color",
            "calc",
            "--start",
            "2021-01-01",
            "--end",
            "2021-02-01",
            "--capital",
            "1000",
            "-f",
            "month",
            "--save-csv",
        ])
        .expect("parse failed");

        assert!(cli.no_color);
        match cli.command {
            Commands::Calc {
                start,
                capital,
                frequency,
                save_csv,
                window,
                ..
            } => {
                assert_eq!(start, "2021-01-01");
                assert_eq!(capital, "1000");
                assert_eq!(frequency, "month");
                assert!(save_csv);
                assert_eq!(window, None);
            }
            _ => panic!("expected calc command"),
        }
    }

    #[test]
    fn calc_requires_dates() {
        assert!(Cli::try_parse_from(["selic", "calc", "--capital", "1"]).is_err());
    }

    #[test]
    fn window_must_be_positive() {
        let args = |w: &'static str| {
            [
                "selic", "calc", "--start", "2021-01-01", "--end", "2021-02-01", "--capital",
                "1", "--window", w,
            ]
        };
        assert!(Cli::try_parse_from(args("0")).is_err());
        assert!(Cli::try_parse_from(args("-3")).is_err());

        let cli = Cli::try_parse_from(args("20")).expect("parse failed");
        match cli.command {
            Commands::Calc { window, .. } => assert_eq!(window, Some(20)),
            _ => panic!("expected calc command"),
        }
    }
}
