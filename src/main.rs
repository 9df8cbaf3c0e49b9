//! CLI entry point: load the test and train tables, then split or fold the train table.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use kfold_prep::{
    column_names, load_table, preview, split_features_labels, PipelineConfig, PrepError,
};
use polars::prelude::DataFrame;
use std::path::Path;
use tracing::{error, info};

/// What to do with the train table once it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Separate features from labels and check the sample counts align
    Split,
    /// Print the train/test row indices of each cross-validation fold
    Kfold,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Load CSV datasets, drop incomplete rows and prepare training splits",
    long_about = "Loads a test and a train table, removes rows with missing values and \
                  previews both. The train table is then split into features and labels \
                  (--mode split) or partitioned into cross-validation folds (--mode kfold).\n\n\
                  EXAMPLES:\n  \
                  kfold-prep --train data/train.csv --test data/test.csv\n  \
                  kfold-prep --mode kfold --folds 10\n  \
                  kfold-prep --mode kfold --shuffle --seed 42 --json"
)]
struct Args {
    /// Path to the test table (no label column required)
    #[arg(long, default_value = "test.csv")]
    test: String,

    /// Path to the train table
    #[arg(long, default_value = "train.csv")]
    train: String,

    /// Name of the label column in the train table
    #[arg(short, long, default_value = "Class")]
    label: String,

    #[arg(short, long, value_enum, default_value = "split")]
    mode: Mode,

    /// Number of cross-validation folds
    #[arg(short = 'k', long, default_value = "10")]
    folds: usize,

    /// Shuffle rows before building folds
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    /// Rows shown when previewing each table
    #[arg(long, default_value = "10")]
    preview_rows: usize,

    /// Field separator of the input files
    #[arg(long, default_value = ",")]
    separator: char,

    /// Keep the label column in the feature matrix (features are every column but the first)
    #[arg(long)]
    keep_label: bool,

    /// Print folds as JSON lines (kfold mode only)
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    if args.json && args.mode != Mode::Kfold {
        return Err(anyhow!("--json only applies to --mode kfold"));
    }

    if !args.separator.is_ascii() {
        return Err(anyhow!("Separator must be an ASCII character: {:?}", args.separator));
    }
    let separator = args.separator as u8;

    let mut builder = PipelineConfig::builder()
        .test_path(&args.test)
        .train_path(&args.train)
        .label_column(&args.label)
        .n_folds(args.folds)
        .preview_rows(args.preview_rows)
        .separator(separator)
        .keep_label_in_features(args.keep_label)
        .shuffle(args.shuffle);

    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    Ok(builder.build()?)
}

/// Loads a table and prints its head and column names.
fn load_and_show(path: &Path, config: &PipelineConfig) -> Result<DataFrame> {
    let df = load_table(path, &config.load_options())?;
    println!("{}", preview(&df, config.preview_rows));
    println!("{:?}", column_names(&df));
    Ok(df)
}

fn run_split(train: &DataFrame, config: &PipelineConfig) -> Result<()> {
    let dataset = split_features_labels(train, &config.split_options())?;
    let (rows, cols) = dataset.features().dim();
    println!("X: {rows} samples x {cols} features {:?}", dataset.feature_names());
    println!("y: {} labels ({})", dataset.labels().len(), dataset.labels().name());
    Ok(())
}

fn run_kfold(train: &DataFrame, config: &PipelineConfig, json: bool) -> Result<()> {
    for fold in config.kfold()?.split_table(train)? {
        if json {
            println!("{}", serde_json::to_string(&fold)?);
        } else {
            println!("TRAIN: {:?} TEST: {:?}", fold.train, fold.test);
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;

    // The test table has no label column; it is only inspected.
    load_and_show(&config.test_path, &config)?;
    let train = load_and_show(&config.train_path, &config)?;

    match args.mode {
        Mode::Split => run_split(&train, &config),
        Mode::Kfold => run_kfold(&train, &config, args.json),
    }?;

    info!(mode = ?args.mode, "Done");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    run(&args).map_err(|e| {
        if let Some(prep) = e.downcast_ref::<PrepError>() {
            error!(code = prep.error_code(), "{e:#}");
        }
        e
    })
}
