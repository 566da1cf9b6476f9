//! trivia CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use trivia_core::response::ErrorResponse;
use trivia_core::CatalogError;

mod commands;

use commands::{OutputFormat, Session};

#[derive(Parser)]
#[command(
    name = "trivia",
    version,
    about = "Trivia question catalog with paging, search, and quizzes"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file or directory (overrides the configured store)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format: json, table
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and sample catalog
    Init,

    /// Validate catalog TOML files
    Validate,

    /// List all categories
    Categories,

    /// List one page of questions
    Questions {
        /// Page number, 10 questions per page
        #[arg(long, allow_hyphen_values = true)]
        page: Option<String>,
    },

    /// List every question in a category
    CategoryQuestions {
        /// Category id
        #[arg(long, allow_hyphen_values = true)]
        id: i64,
    },

    /// Find questions whose text contains a term
    Search {
        /// Search term, matched ignoring case
        #[arg(long)]
        term: Option<String>,
    },

    /// Add a question
    Add {
        #[arg(long)]
        question: Option<String>,

        #[arg(long)]
        answer: Option<String>,

        /// Category id
        #[arg(long, allow_hyphen_values = true)]
        category: Option<i64>,

        /// Difficulty, 1 or more
        #[arg(long, allow_hyphen_values = true)]
        difficulty: Option<i64>,
    },

    /// Delete a question
    Delete {
        /// Question id
        #[arg(long, allow_hyphen_values = true)]
        id: i64,
    },

    /// Play a quiz: draw questions without repeats
    Play {
        /// Restrict the quiz to one category
        #[arg(long, allow_hyphen_values = true)]
        category: Option<i64>,

        /// Question ids already served (comma-separated)
        #[arg(long, value_delimiter = ',')]
        previous: Vec<i64>,

        /// Questions to draw (default: questions_per_play from config)
        #[arg(long)]
        rounds: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trivia=info".parse().unwrap()),
        )
        .init();

    let result = run(Cli::parse()).await;

    if let Err(e) = result {
        if let Some(err) = e.downcast_ref::<CatalogError>() {
            let envelope = ErrorResponse::from(err);
            if let Ok(body) = serde_json::to_string_pretty(&envelope) {
                println!("{body}");
            }
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        catalog,
        format,
        command,
    } = cli;
    let session = || Session::open(config.as_deref(), catalog.clone(), format);

    match command {
        Commands::Init => commands::init::execute(),
        Commands::Validate => commands::validate::execute(config.as_deref(), catalog.as_deref()),
        Commands::Categories => commands::categories::execute(&session()?).await,
        Commands::Questions { page } => commands::questions::execute(&session()?, page).await,
        Commands::CategoryQuestions { id } => {
            commands::category_questions::execute(&session()?, id).await
        }
        Commands::Search { term } => commands::search::execute(&session()?, term).await,
        Commands::Add {
            question,
            answer,
            category,
            difficulty,
        } => {
            commands::add::execute(&session()?, question, answer, category, difficulty).await
        }
        Commands::Delete { id } => commands::delete::execute(&session()?, id).await,
        Commands::Play {
            category,
            previous,
            rounds,
        } => commands::play::execute(&session()?, category, previous, rounds).await,
    }
}
