//! Command-line entry point.
//!
//! ```text
//! featherweight-summary summary <workout_id>
//! featherweight-summary patterns
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use featherweight::repository::SqliteRepository;
use featherweight::{db, load_summary_state, load_training_patterns, Config, SummaryState};

#[derive(Parser, Debug)]
#[command(
  name = "featherweight-summary",
  about = "Print workout summaries and training-pattern metrics as JSON",
  arg_required_else_help = true
)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
  /// Completion summary of one workout
  Summary {
    /// Workout id
    workout_id: i64,
  },

  /// Consistency score and rest-interval distribution over all history
  Patterns,
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| featherweight::config::DEFAULT_LOG_LEVEL.to_string())
        .parse::<tracing_subscriber::EnvFilter>()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .init();

  let config = match Config::from_env() {
    Ok(config) => config,
    Err(e) => {
      tracing::error!("Configuration error: {}", e);
      return ExitCode::FAILURE;
    }
  };

  let pool = match db::initialize_db(&config).await {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!("Failed to initialize database: {}", e);
      return ExitCode::FAILURE;
    }
  };
  let repo = SqliteRepository::new(pool);

  let (output, ok) = match cli.command {
    Command::Summary { workout_id } => {
      let state = load_summary_state(&repo, workout_id).await;
      let ok = matches!(state, SummaryState::Loaded { .. });
      (serde_json::to_string_pretty(&state), ok)
    }
    Command::Patterns => match load_training_patterns(&repo, Local::now().date_naive()).await {
      Ok(metrics) => (serde_json::to_string_pretty(&metrics), true),
      Err(e) => {
        tracing::error!("Failed to load training patterns: {}", e);
        return ExitCode::FAILURE;
      }
    },
  };

  match output {
    Ok(json) => {
      println!("{}", json);
      if ok {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      }
    }
    Err(e) => {
      tracing::error!("Failed to serialize output: {}", e);
      ExitCode::FAILURE
    }
  }
}
