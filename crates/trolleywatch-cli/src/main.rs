mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "trolleywatch",
    version,
    about = "Scrape the HSE TrolleyGAR report and infer severity thresholds"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape daily snapshots into a record store
    Scrape {
        /// Single report date DD/MM/YYYY
        #[arg(long, conflicts_with_all = ["start", "end"])]
        date: Option<String>,

        /// Range start DD/MM/YYYY
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// Range end DD/MM/YYYY
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Output store: .csv for CSV, anything else is SQLite
        #[arg(short, long, default_value = "trolleygar.db")]
        output: PathBuf,

        /// Seconds to wait between consecutive requests
        #[arg(long, default_value_t = 1.0)]
        delay: f64,

        /// Custom color-rules JSON file
        #[arg(long, value_name = "FILE")]
        color_rules: Option<PathBuf>,

        /// Append without eliminating duplicate rows
        #[arg(long)]
        no_dedup: bool,

        /// Remove duplicate rows already in the store after writing
        #[arg(long)]
        clean_duplicates: bool,
    },
    /// Survey historical snapshots for (value, color) observations
    Survey {
        /// Range start DD/MM/YYYY
        #[arg(long)]
        start: String,

        /// Range end DD/MM/YYYY
        #[arg(long)]
        end: String,

        /// Output CSV file
        #[arg(short, long, default_value = "colors.csv")]
        output: PathBuf,

        /// Seconds to wait between consecutive requests
        #[arg(long, default_value_t = 1.0)]
        delay: f64,

        /// Custom color-rules JSON file
        #[arg(long, value_name = "FILE")]
        color_rules: Option<PathBuf>,

        /// Print proven color boundaries after scraping
        #[arg(long)]
        analyze: bool,
    },
    /// Infer severity thresholds from a stored history
    Analyze {
        /// History file (.csv, or SQLite database)
        input: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Additional entity names to exclude from inference
        #[arg(long, value_name = "NAME")]
        exclude: Vec<String>,
    },
    /// Aggregate per-region mean totals for the presentation layer
    Regions {
        /// History file (.csv, or SQLite database)
        input: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape {
            date,
            start,
            end,
            output,
            delay,
            color_rules,
            no_dedup,
            clean_duplicates,
        } => commands::scrape::run(
            date,
            start,
            end,
            output,
            delay,
            color_rules,
            no_dedup,
            clean_duplicates,
        ),
        Commands::Survey {
            start,
            end,
            output,
            delay,
            color_rules,
            analyze,
        } => commands::survey::run(&start, &end, output, delay, color_rules, analyze),
        Commands::Analyze {
            input,
            output,
            exclude,
        } => commands::analyze::run(input, &output, exclude),
        Commands::Regions { input, output } => commands::regions::run(input, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
