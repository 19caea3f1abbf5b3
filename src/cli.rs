use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Lifting-scheme wavelet laboratory.
#[derive(Parser)]
#[command(
    name = "wavelift",
    version,
    about = "Lifting-scheme wavelets, smoothness analysis and stable wavelet construction"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Sample a basis or test function, optionally compressed, smoothed or projected.
    Basis(BasisArgs),
    /// Report the smoothness of a scheme's primal and dual functions.
    Analyze(AnalyzeArgs),
    /// Append a stabilising update to a custom script.
    Construct(ConstructArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Scheme selection shared by `basis` and `analyze`.
#[derive(clap::Args)]
pub struct SchemeArgs {
    /// Scheme name (haar, cdf53, cdf97, d4, four-point, stable-linear, ..., custom).
    #[arg(short, long)]
    pub scheme: Option<String>,

    /// Step script file; implies `--scheme custom` when no scheme is given.
    #[arg(long)]
    pub script: Option<PathBuf>,
}

/// Which function `basis` samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FunctionArg {
    Scaling,
    Wavelet,
    DualScaling,
    DualWavelet,
    /// The test function chosen by `--test-function`.
    Test,
}

/// Component view of `basis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SpaceArg {
    Scaling,
    Wavelet,
}

/// Arguments for the `basis` subcommand.
#[derive(clap::Args)]
pub struct BasisArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub scheme: SchemeArgs,

    /// Number of levels; the result has 2^levels samples.
    #[arg(short, long)]
    pub levels: Option<u32>,

    /// Boundary mode (clamped or cyclic).
    #[arg(long)]
    pub boundary: Option<String>,

    /// Function to sample.
    #[arg(short, long, value_enum, default_value_t = FunctionArg::Scaling)]
    pub function: FunctionArg,

    /// Test function index (0..10) for `--function test`.
    #[arg(long, default_value_t = 0)]
    pub test_function: usize,

    /// Hard-threshold the decomposition at this value.
    #[arg(long, conflicts_with = "smooth")]
    pub compress: Option<f64>,

    /// Soft-threshold the finest levels at this value.
    #[arg(long)]
    pub smooth: Option<f64>,

    /// Number of levels `--smooth` acts on.
    #[arg(long)]
    pub smooth_level: Option<u32>,

    /// Report only the component in this space.
    #[arg(long, value_enum, requires = "level")]
    pub space: Option<SpaceArg>,

    /// Level of the `--space` component.
    #[arg(long, requires = "space")]
    pub level: Option<u32>,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub scheme: SchemeArgs,
}

/// Arguments for the `construct` subcommand.
#[derive(clap::Args)]
pub struct ConstructArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Step script file to extend.
    #[arg(long)]
    pub script: PathBuf,

    /// Override the smallest swept coefficient from config.
    #[arg(long, allow_hyphen_values = true)]
    pub min_alpha: Option<f64>,

    /// Override the largest swept coefficient from config.
    #[arg(long, allow_hyphen_values = true)]
    pub max_alpha: Option<f64>,

    /// Override the sweep increment from config.
    #[arg(long)]
    pub step: Option<f64>,

    /// Evaluate candidates on one thread.
    #[arg(long)]
    pub sequential: bool,
}
