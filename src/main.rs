use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quiz_studio::{ClientConfig, HttpApiClient, Logger, QuizApi, StudioError};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend API root, overrides QUIZ_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for log files, overrides QUIZ_LOG_DIR
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive client (default)
    Tui,
    /// Check that the backend is reachable
    Health,
    /// List uploaded files as JSON
    Files {
        /// Show only this file's metadata
        #[arg(long)]
        file_id: Option<String>,
    },
    /// List quizzes as JSON
    Quizzes {
        /// Only quizzes generated from this file
        #[arg(long)]
        file_id: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), StudioError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = args.log_dir {
        config.log_dir = dir;
    }

    let _logger = Logger::init(&config.log_dir)?;

    let api = HttpApiClient::new(&config);
    match args.command.unwrap_or(Command::Tui) {
        Command::Tui => quiz_studio::run(&config).await,
        Command::Health => print_json(&api.health().await?),
        Command::Files { file_id: Some(id) } => print_json(&api.get_file(&id).await?),
        Command::Files { file_id: None } => print_json(&api.list_files().await?),
        Command::Quizzes { file_id } => print_json(&api.list_quizzes(file_id.as_deref()).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), StudioError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
