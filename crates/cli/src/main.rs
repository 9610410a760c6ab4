use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod echo;

use commands::{AnalyzeArgs, ExtractArgs, RunArgs, ScoreArgs};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score web articles for sentiment and readability
#[derive(Parser, Debug)]
#[command(name = "sententia")]
#[command(author = "Sententia Contributors")]
#[command(version)]
#[command(about = "Lexicon sentiment and readability metrics for web articles", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract every article, score it and write the output table
    Run(RunArgs),
    /// Fetch every URL and write one article file per row
    Extract(ExtractArgs),
    /// Score an existing articles directory and write the output table
    Analyze(AnalyzeArgs),
    /// Score a single text (or HTML page) and print its metrics
    Score(ScoreArgs),
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let verbose = cli.verbose > 0;
    if verbose {
        echo::print_banner();
    }

    match cli.command {
        Commands::Run(args) => commands::run(&args, verbose).await,
        Commands::Extract(args) => commands::extract(&args, verbose).await,
        Commands::Analyze(args) => commands::analyze(&args, verbose),
        Commands::Score(args) => commands::score(&args, verbose),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sententia", &mut io::stdout());
            Ok(())
        }
    }
}
