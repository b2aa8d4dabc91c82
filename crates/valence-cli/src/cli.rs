use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "valfit - symmetry-typed valence baselines for molecular force-field fitting.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report symmetry-class statistics for the built-in demo molecules.
    Classes(ClassesArgs),
    /// Evaluate a random valence baseline over jittered conformations of one molecule.
    Baseline(BaselineArgs),
}

/// Arguments for the `classes` subcommand.
#[derive(Args, Debug)]
pub struct ClassesArgs {
    /// Restrict the report to a single demo molecule by name.
    #[arg(short, long, value_name = "NAME")]
    pub molecule: Option<String>,
}

/// Arguments for the `baseline` subcommand.
#[derive(Args, Debug)]
pub struct BaselineArgs {
    /// Demo molecule to evaluate.
    #[arg(short, long, default_value = "ethanol", value_name = "NAME")]
    pub molecule: String,

    /// Number of jittered conformations to generate.
    #[arg(short = 'n', long, default_value_t = 50, value_name = "NUM")]
    pub frames: usize,

    /// Maximum per-coordinate displacement applied to each frame, in Angstroms.
    #[arg(long, default_value_t = 0.05, value_name = "FLOAT")]
    pub jitter: f64,

    /// Seed for the random number generator; random when omitted.
    #[arg(long, value_name = "NUM")]
    pub seed: Option<u64>,

    /// Load the candidate parameter set from a TOML file instead of random
    /// initialization.
    #[arg(long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Write the candidate parameter set to a TOML file after evaluation.
    #[arg(long, value_name = "PATH")]
    pub save_params: Option<PathBuf>,
}
