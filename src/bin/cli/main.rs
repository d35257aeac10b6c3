mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lexis-cli", about = "Vocabulary companion core, on the command line", version)]
struct Cli {
    /// Backend snapshot file (default: $LEXIS_SNAPSHOT)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Filter chip, as exposed on the word-list screen
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FilterArg {
    All,
    New,
    Acquiring,
    Learning,
    Known,
    Lapsed,
    Suspended,
    Leech,
    Struggling,
    Recent,
    Solid,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OrderArg {
    /// Worst accuracy first
    Accuracy,
    /// Highest mastery first
    Knowledge,
    /// Failed, passed, then unseen
    Category,
}

#[derive(Subcommand)]
enum Command {
    /// List tracked words with filter-chip counts
    Words {
        /// Filter chip to apply
        #[arg(long, default_value = "all")]
        filter: FilterArg,
        /// Free-text search over word, gloss and transliteration
        #[arg(long, default_value = "")]
        search: String,
        /// List ordering
        #[arg(long)]
        order: Option<OrderArg>,
    },

    /// Render the dashboard numbers derived from backend analytics
    Dashboard,

    /// Run a scripted learn session
    Learn {
        /// How many candidates to introduce
        #[arg(long, default_value_t = 3)]
        introduce: usize,
        /// Quiz answers, one letter per card: c (correct) or i (incorrect)
        #[arg(long, default_value = "")]
        answers: String,
        /// Candidate batch size
        #[arg(long, default_value_t = lexis::learn::DEFAULT_BATCH_SIZE)]
        batch: usize,
    },
}

fn snapshot_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    cli.snapshot
        .clone()
        .or_else(|| std::env::var_os("LEXIS_SNAPSHOT").map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("no snapshot file given (use --snapshot or $LEXIS_SNAPSHOT)"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let api = lexis::api::SnapshotApi::load(&snapshot_path(&cli)?)?;

    match cli.command {
        Command::Words {
            filter,
            search,
            order,
        } => commands::words::run(&api, filter, &search, order, &cli.format).await?,
        Command::Dashboard => commands::dashboard::run(&api, &cli.format).await?,
        Command::Learn {
            introduce,
            answers,
            batch,
        } => commands::learn::run(api, introduce, &answers, batch).await?,
    }

    Ok(())
}
