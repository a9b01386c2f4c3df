//! CLI entrypoint for rostrum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Result};
use clap::Parser;
use rostrum_application::{
    ContextRetriever, DebateEvent, DebateParams, DisabledRetriever, RetrievalOptions,
    RunDebateError, RunDebateInput, RunDebateUseCase, TranscriptLogger,
};
use rostrum_infrastructure::{
    ConfigLoader, DuckDuckGoRetriever, JsonlTranscriptLogger, OpenAiCompatGateway,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Staged multi-participant debate engine
#[derive(Parser, Debug)]
#[command(name = "rostrum", version, about)]
struct Cli {
    /// The debate topic
    topic: String,

    /// Participant keys in panel order (comma separated), e.g.
    /// economist,sociologist,ethicist
    #[arg(short = 'p', long = "participants", value_delimiter = ',')]
    participants: Vec<String>,

    /// Free-debate rounds
    #[arg(short = 'r', long = "rounds")]
    rounds: Option<usize>,

    /// Disable reference material retrieval
    #[arg(long)]
    no_retrieval: bool,

    /// Seed for the scheduler RNG (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Explicit configuration file path
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Ignore all configuration files, use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Write a JSONL transcript log to this path
    #[arg(long = "transcript-log")]
    transcript_log: Option<PathBuf>,

    /// Print the final state as JSON instead of rendering turns
    #[arg(long)]
    json: bool,

    /// Suppress the banner and stage headers
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting rostrum");

    // Load file configuration, then apply CLI overrides
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let participants = if cli.participants.is_empty() {
        config.debate.participants.clone()
    } else {
        cli.participants.clone()
    };
    let max_rounds = cli.rounds.unwrap_or(config.debate.max_rounds);
    let retrieval_enabled = !cli.no_retrieval && config.retrieval.enabled;

    let mut params = DebateParams::default()
        .with_max_rounds(max_rounds)
        .with_retrieval(if retrieval_enabled {
            RetrievalOptions {
                enabled: true,
                max_items: config.retrieval.max_items,
            }
        } else {
            RetrievalOptions::disabled()
        });
    if let Some(seed) = cli.seed {
        params = params.with_seed(seed);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(
        OpenAiCompatGateway::from_config(&config.inference).map_err(|e| anyhow::anyhow!(e))?,
    );
    let retriever: Arc<dyn ContextRetriever> = if retrieval_enabled {
        Arc::new(DuckDuckGoRetriever::new().map_err(|e| anyhow::anyhow!(e))?)
    } else {
        Arc::new(DisabledRetriever)
    };

    let mut use_case = RunDebateUseCase::new(gateway, retriever);
    let log_path = cli
        .transcript_log
        .clone()
        .or_else(|| config.logging.transcript_path.as_ref().map(PathBuf::from));
    if let Some(path) = log_path {
        match JsonlTranscriptLogger::new(&path) {
            Some(logger) => {
                info!("Transcript log: {}", logger.path().display());
                let logger: Arc<dyn TranscriptLogger> = Arc::new(logger);
                use_case = use_case.with_transcript_logger(logger);
            }
            None => bail!("Could not open transcript log at {}", path.display()),
        }
    }

    // Cancellation on Ctrl-C
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let input = RunDebateInput::new(cli.topic.clone(), participants, params);
    let mut run = use_case.start(input, cancel)?;

    if !cli.quiet && !cli.json {
        print_banner(&cli.topic, run.state());
    }

    // Drive the debate one event at a time
    let mut cancelled = false;
    loop {
        match run.next_event().await {
            Ok(Some(event)) => {
                if !cli.json {
                    render_event(&event, cli.quiet);
                }
            }
            Ok(None) => break,
            Err(RunDebateError::Cancelled) => {
                cancelled = true;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(run.state())?);
    } else if cancelled {
        eprintln!(
            "\nDebate cancelled after {} spoken turns; partial transcript above.",
            run.state().total_turns()
        );
    } else if !cli.quiet {
        println!(
            "\nDebate complete: {} spoken turns across 4 stages.",
            run.state().total_turns()
        );
    }

    Ok(())
}

/// Print the pre-run header with the expected turn arithmetic.
fn print_banner(topic: &str, state: &rostrum_domain::DebateState) {
    let n = state.participant_count();
    let rounds = state.max_rounds();
    println!();
    println!("+============================================================+");
    println!("|                 rostrum - staged debate                    |");
    println!("+============================================================+");
    println!();
    println!("Topic: {topic}");
    println!(
        "Panel: {}",
        state
            .panel()
            .iter()
            .map(|id| id.display_name().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Turns: opening {n} + questioning {} + free debate {} + closing {n} = {}",
        2 * n,
        n * rounds,
        state.expected_spoken_turns()
    );
    println!();
}

/// Render one debate event to the console.
fn render_event(event: &DebateEvent, quiet: bool) {
    match event {
        DebateEvent::StageChange {
            announcement, ..
        } => {
            if !quiet {
                println!("\n=== {announcement} ===\n");
            }
        }
        DebateEvent::Turn(record) => {
            match record.round {
                Some(round) => println!("[{} r{}] {}", record.stage, round, record.content),
                None => println!("[{}] {}", record.stage, record.content),
            }
            println!();
        }
    }
}
