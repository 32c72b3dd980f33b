use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use neethub::claude::{ApiKeyManager, ClaudeClient};
use neethub::history::result::format_elapsed;
use neethub::quiz::scoring::{Verdict, verdicts};
use neethub::quiz::Question;
use neethub::supply::SupplyRequest;
use neethub::{App, Config, ResultStore, Subject, SupplySource, TestType, catalog};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neethub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List past attempts, newest first
    History,
    /// Average accuracy per subject
    Stats,
    /// Rewrite history without records that could not be loaded
    Repair,
    /// Print the chapter catalog
    Chapters {
        /// Only chapters of this subject (biology, physics, chemistry)
        #[arg(short, long)]
        subject: Option<Subject>,
    },
    /// Show the score card and answers of one attempt
    Review {
        /// Attempt id (a unique prefix is enough)
        id: String,
    },
    /// Store the Anthropic API key in the system keyring
    SetKey {
        key: String,
        /// Send a minimal request to confirm the key works
        #[arg(long)]
        check: bool,
    },
    /// Practice with questions from a local JSON file instead of the AI
    Practice {
        /// JSON array of questions
        #[arg(short, long)]
        fixture: PathBuf,
        #[arg(short, long, default_value = "biology")]
        subject: Subject,
        /// chapter-wise, mixed, statement or pyq
        #[arg(short = 't', long = "type", default_value = "mixed")]
        test_type: TestType,
    },
}

/// Default log filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "neethub=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Log to stderr for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Log to a daily file while the TUI owns the terminal
fn init_tui_logging() -> Result<WorkerGuard> {
    let log_dir = Config::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "neethub.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = Config::load()?;
            let source = SupplySource::Claude(config.model);
            run_tui(config, source, None).await?;
        }
        Some(Commands::Practice { fixture, subject, test_type }) => {
            if !fixture.exists() {
                return Err(anyhow!("Fixture file not found: {}", fixture.display()));
            }
            let config = Config::load()?;
            let request = SupplyRequest::new(test_type, subject).with_count(config.question_count);
            run_tui(config, SupplySource::Fixture(fixture), Some(request)).await?;
        }
        Some(Commands::History) => {
            init_cli_logging();
            print_history(&ResultStore::open_default()?);
        }
        Some(Commands::Stats) => {
            init_cli_logging();
            print_stats(&ResultStore::open_default()?);
        }
        Some(Commands::Repair) => {
            init_cli_logging();
            repair_history(ResultStore::open_default()?)?;
        }
        Some(Commands::Chapters { subject }) => {
            init_cli_logging();
            print_chapters(subject);
        }
        Some(Commands::Review { id }) => {
            init_cli_logging();
            print_review(&ResultStore::open_default()?, &id)?;
        }
        Some(Commands::SetKey { key, check }) => {
            init_cli_logging();
            let key = key.trim();
            if check {
                check_key(key).await?;
            }
            ApiKeyManager::set_api_key(key).context("Failed to store API key")?;
            println!("Stored API key {}", ApiKeyManager::mask_key(key));
        }
    }

    Ok(())
}

async fn run_tui(config: Config, source: SupplySource, start: Option<SupplyRequest>) -> Result<()> {
    let _guard = init_tui_logging()?;
    let store = ResultStore::open_default()?;
    tracing::info!("Starting TUI with {} stored attempts", store.len());

    let mut app = App::new(config, store, source)?;
    if let Some(request) = start {
        app.start_test(request);
    }
    app.run().await
}

async fn check_key(key: &str) -> Result<()> {
    let client = ClaudeClient::new(key.to_string())?;
    match client.test_connection().await {
        Ok(()) => {
            println!("API key accepted");
            Ok(())
        }
        Err(e) if e.requires_reauth() => Err(anyhow!("API key rejected: {}", e)),
        Err(e) => Err(e).context("Could not reach the Claude API"),
    }
}

fn print_history(store: &ResultStore) {
    if store.dropped() > 0 {
        eprintln!("Skipped {} unreadable records; run `neethub repair` to remove them.", store.dropped());
    }
    if store.is_empty() {
        println!("No tests taken yet ({}).", store.path().display());
        return;
    }

    println!("{:<10} {:<3} {:<16} {:<13} {:>6} {:>5} {:>4}  {}", "ID", "", "TYPE", "DATE", "SCORE", "ACC", "QS", "TIME");
    for result in store.recent() {
        println!(
            "{:<10} {:<3} {:<16} {:<13} {:>6} {:>4}% {:>4}  {}",
            &result.id[..result.id.len().min(8)],
            result.subject.badge(),
            result.test_type.label(),
            result.date_label(),
            result.score,
            result.accuracy_percent,
            result.total_questions,
            result.elapsed_label
        );
    }
}

fn repair_history(mut store: ResultStore) -> Result<()> {
    let dropped = store.dropped();
    if dropped == 0 {
        println!("Nothing to repair ({} results).", store.len());
        return Ok(());
    }
    store.flush().context("Failed to rewrite history")?;
    println!("Removed {} unreadable records, kept {}.", dropped, store.len());
    Ok(())
}

fn print_stats(store: &ResultStore) {
    for subject in Subject::all().iter().copied() {
        let stats = store.aggregate_by_subject(subject);
        println!("{:<10} {:>3}%  ({} tests)", subject.label(), stats.average_accuracy, stats.count);
    }
}

fn print_chapters(subject: Option<Subject>) {
    let subjects: Vec<Subject> = match subject {
        Some(s) => vec![s],
        None => Subject::all().to_vec(),
    };

    for subject in subjects {
        println!("{}", subject.label());
        for chapter in catalog::chapters_for(subject) {
            println!("  {:<7} Class {}  {:<15} {}", chapter.id, chapter.class_level, chapter.unit, chapter.name);
        }
    }
}

fn print_review(store: &ResultStore, id: &str) -> Result<()> {
    let result = match store.find(id) {
        Some(result) => result,
        None => {
            let matches: Vec<_> = store.load_all().iter().filter(|r| r.id.starts_with(id)).collect();
            match matches.as_slice() {
                [one] => *one,
                [] => return Err(anyhow!("No attempt with id {}", id)),
                _ => return Err(anyhow!("Id prefix {} matches {} attempts", id, matches.len())),
            }
        }
    };

    let card = result.rescore();
    let session = &result.snapshot;
    println!("{} \u{00B7} {} \u{00B7} {}", result.subject.label(), result.test_type.label(), result.date_label());
    println!("Score     {} / {}", card.score, card.max_score);
    println!("Accuracy  {}%", card.accuracy_percent);
    println!("Correct {}  Wrong {}  Skipped {}", card.correct, card.incorrect, card.unattempted);
    if let Some(elapsed) = session.elapsed() {
        println!("Time      {}", format_elapsed(elapsed.num_seconds().max(0) as u64));
    }
    println!();

    let width = crossterm::terminal::size().map_or(80, |(cols, _)| usize::from(cols)).min(100);
    for (i, ((question, answer), verdict)) in
        session.questions().iter().zip(session.answers()).zip(verdicts(session)).enumerate()
    {
        let mark = match verdict {
            Verdict::Correct => "+",
            Verdict::Incorrect => "x",
            Verdict::Unattempted => "-",
        };
        let heading = format!("{} Q{}. {}", mark, i + 1, question.text);
        for line in textwrap::wrap(&heading, width) {
            println!("{}", line);
        }
        let yours = answer.map_or_else(|| "-".to_string(), |a| Question::option_letter(a).to_string());
        println!(
            "    yours: {}  correct: {}) {}",
            yours,
            Question::option_letter(question.correct_index),
            question.correct_option().unwrap_or("?")
        );
        let options = textwrap::Options::new(width).initial_indent("    ").subsequent_indent("    ");
        for line in textwrap::wrap(&question.explanation, &options) {
            println!("{}", line);
        }
        println!("    NCERT: {}", question.reference);
        println!();
    }

    Ok(())
}
