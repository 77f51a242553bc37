use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::cmd::config::{Action, Config, Fit as FitCfg, Generate as GenerateCfg};
use olsfit_core::data::Synthetic;
use olsfit_core::pipeline::FitJob;
use olsfit_core::slope::SlopeExpectation;

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
        },
    }
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=1.0).contains(&v) {
        return Err(format!("must be between 0 and 1, got {v}"));
    }
    Ok(v)
}

fn parse_noise(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(v.is_finite() && v >= 0.0) {
        return Err(format!("must be a finite, non-negative number, got {v}"));
    }
    Ok(v)
}

#[derive(Debug, Parser)]
#[command(
    name = "olsfit",
    about = "Fit a straight line to paired observations with ordinary least squares",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit a line to a two-column CSV and report its quality
    Fit(FitArgs),

    /// Write a noisy synthetic line to a CSV
    Generate(GenerateArgs),
}

/* ------------------------- fit ------------------------- */

#[derive(Debug, Args)]
pub struct FitArgs {
    /// CSV with a header row; x in column 1, y in column 2
    #[arg(value_hint = ValueHint::FilePath, value_name = "CSV")]
    pub input: PathBuf,

    /// Field delimiter
    #[arg(short = 'd', long = "delimiter", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Fraction of rows held out for testing (0 fits on every row)
    #[arg(short = 't', long = "test-size", default_value_t = 0.0, value_parser = parse_fraction)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Directory for the regression plot
    #[arg(long = "plot-dir", default_value = "graphics", value_hint = ValueHint::DirPath)]
    pub plot_dir: PathBuf,

    /// Skip the plot
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// Expected slope direction (any, negative, positive)
    #[arg(long = "expect-slope", default_value = "any")]
    pub expect_slope: SlopeExpectation,

    /// Predict y for this x after fitting (repeatable)
    #[arg(short = 'p', long = "predict", value_name = "X", allow_negative_numbers = true)]
    pub predict: Vec<f64>,

    /// Print the report as JSON on stdout
    #[arg(long = "json")]
    pub json: bool,
}

/* ----------------------- generate ----------------------- */

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of samples
    #[arg(short = 'n', long = "samples", default_value_t = 100)]
    pub n_samples: usize,

    /// Relative noise level
    #[arg(long = "noise", default_value_t = 0.1, value_parser = parse_noise)]
    pub noise: f64,

    /// True slope
    #[arg(long = "slope", default_value_t = 2.0, allow_negative_numbers = true)]
    pub slope: f64,

    /// True intercept
    #[arg(long = "intercept", default_value_t = 1.0, allow_negative_numbers = true)]
    pub intercept: f64,

    /// Seed for the generator
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Output CSV path
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

// -------- Map CLI -> Config/Action --------

impl Cli {
    pub fn into_config(self) -> Config {
        let action = match self.command {
            Commands::Fit(args) => Action::Fit(FitCfg {
                job: FitJob {
                    input: args.input,
                    delimiter: args.delimiter,
                    test_size: args.test_size,
                    plot_dir: if args.no_plot { None } else { Some(args.plot_dir) },
                    expect_slope: args.expect_slope,
                    predict: args.predict,
                },
                seed: args.seed,
                json: args.json,
            }),
            Commands::Generate(args) => Action::Generate(GenerateCfg {
                synthetic: Synthetic {
                    n_samples: args.n_samples,
                    noise: args.noise,
                    slope: args.slope,
                    intercept: args.intercept,
                },
                seed: args.seed,
                output: args.output,
            }),
        };
        Config { action }
    }
}
