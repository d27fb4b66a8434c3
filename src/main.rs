use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use rollcall::{
    CategorizeConfig, HttpStore, MemoryStore, PipelineConfig, StoreConfig, categorize,
    read_survey_file, run_pipeline,
};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(author, version, about = "Membership survey ingestion pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a survey export and write membership records to the store
    Ingest {
        /// Input survey export (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Fail when any of the four respondent categories has zero rows
        #[arg(long)]
        strict_categories: bool,

        /// Run the whole pipeline but keep records in memory instead of
        /// writing to the store
        #[arg(long)]
        dry_run: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a survey export without writing anything
    Analyze {
        /// Input survey export (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            input,
            strict_categories,
            dry_run,
            verbose,
        } => {
            setup_logging(verbose);
            ingest(input, strict_categories, dry_run).await
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn ingest(input: PathBuf, strict_categories: bool, dry_run: bool) -> Result<()> {
    info!("Loading survey export from {:?}", input);
    let table = read_survey_file(&input).context("Failed to read survey export")?;
    info!("Loaded {} rows, {} columns", table.len(), table.columns.len());

    let config = PipelineConfig {
        categorize: CategorizeConfig {
            require_all_categories: strict_categories,
        },
    };

    let summary = if dry_run {
        let store = MemoryStore::new();
        let summary = run_pipeline(table, &config, &store).await?;
        info!("Dry run: {} records kept in memory, nothing written", store.len());
        summary
    } else {
        let store_config = StoreConfig::from_env()?;
        info!("Writing to table {:?} at {}", store_config.table, store_config.base_url);
        let store = HttpStore::new(store_config);
        run_pipeline(table, &config, &store).await?
    };

    info!(
        "Complete: {} rows in, {} records written",
        summary.total_rows, summary.records_written
    );
    Ok(())
}

fn analyze(input: PathBuf) -> Result<()> {
    info!("Analyzing survey export from {:?}", input);
    let table = read_survey_file(&input).context("Failed to read survey export")?;

    println!("Survey Export Analysis");
    println!("======================");
    println!("Total rows: {}", table.len());
    println!("Total columns: {}", table.columns.len());
    println!();

    let groups = categorize(table, &CategorizeConfig::default())?;

    println!("Respondent Categories");
    println!("---------------------");
    for (category, rows) in groups.iter() {
        println!("{}: {} rows", category, rows.len());
    }
    println!();

    println!("Fields With Data");
    println!("----------------");
    for (category, rows) in groups.iter() {
        let active: Vec<&str> = category
            .rename_table()
            .iter()
            .filter(|(column, _)| rows.iter().any(|row| row.get(column).is_some()))
            .map(|&(_, field)| field.name())
            .collect();
        println!("{}: {}", category, active.join(", "));
    }

    Ok(())
}
