//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::claude::{ClaudeModel, ClaudeSupply};
use crate::config::Config;
use crate::history::{ResultStore, TestResult};
use crate::quiz::QuizSession;
use crate::supply::{FixtureSupply, QuestionSupply, SupplyError, SupplyRequest, start_attempt};
use crate::theme::Theme;
use crate::ui;
use input::key_to_action;
use state::{AppState, Effect, Screen};

/// Where questions come from
#[derive(Debug, Clone)]
pub enum SupplySource {
    Claude(ClaudeModel),
    Fixture(PathBuf),
}

impl SupplySource {
    fn build(
        &self,
        progress: mpsc::UnboundedSender<usize>,
    ) -> Result<Box<dyn QuestionSupply>, SupplyError> {
        match self {
            Self::Claude(model) => {
                let supply = ClaudeSupply::from_env(*model)?.with_progress(progress);
                Ok(Box::new(supply))
            }
            Self::Fixture(path) => Ok(Box::new(FixtureSupply::new(path.clone()))),
        }
    }
}

/// Question generation running in the background
struct Pending {
    result: oneshot::Receiver<Result<QuizSession, SupplyError>>,
    progress: mpsc::UnboundedReceiver<usize>,
    task: JoinHandle<()>,
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    theme: Theme,

    /// Current application state
    state: AppState,

    /// Saved attempts
    store: ResultStore,

    source: SupplySource,

    pending: Option<Pending>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, store: ResultStore, source: SupplySource) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let mut state = AppState::new(config.question_count, config.seconds_per_question);
        if store.dropped() > 0 {
            state.status.set_error(format!("Skipped {} unreadable history records", store.dropped()));
        }
        let theme = config.active_theme();

        Ok(Self { config, theme, state, store, source, pending: None, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &self.store, &self.theme);
            })?;

            self.poll_pending();

            // Handle events
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) =
                            key_to_action(key.code, key.modifiers, self.config.vim_mode)
                        {
                            let effect = self.state.handle_action(action, &self.store);
                            if self.apply(effect) {
                                break;
                            }
                        }
                    }
                }
            }
        }

        self.shutdown();
        self.restore_terminal()?;
        Ok(())
    }

    /// Perform an effect, returns true if should exit
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Generate(request) => self.spawn_generation(request),
            Effect::Finished(session) => self.save_attempt(session),
        }
        false
    }

    /// Start generating a test before the loop runs
    pub fn start_test(&mut self, request: SupplyRequest) {
        self.state.subject = request.subject;
        self.spawn_generation(request);
    }

    fn spawn_generation(&mut self, request: SupplyRequest) {
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let supply = match self.source.build(progress_tx) {
            Ok(supply) => supply,
            Err(e) => {
                tracing::error!("Cannot create question supply: {}", e);
                self.state.status.set_error(format!("Could not start the test: {}", e));
                return;
            }
        };

        self.state.begin_loading(request.clone());
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let result = start_attempt(supply.as_ref(), &request).await;
            let _ = tx.send(result);
        });
        self.pending = Some(Pending { result: rx, progress: progress_rx, task });
    }

    /// Check on background generation without blocking
    fn poll_pending(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        while let Ok(chars) = pending.progress.try_recv() {
            if let Some(loading) = self.state.loading.as_mut() {
                loading.generated_chars = chars;
            }
        }

        let outcome = match pending.result.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(SupplyError::Failed("generation task ended unexpectedly".into()))
            }
        };
        self.pending = None;

        match outcome {
            Ok(session) => {
                tracing::info!("Starting attempt {} with {} questions", session.id(), session.len());
                self.state.begin_quiz(session);
            }
            Err(e) => self.state.generation_failed(format!("Could not start the test: {}", e)),
        }
    }

    fn save_attempt(&mut self, session: QuizSession) {
        let result = match TestResult::from_session(session) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Failed to build result: {}", e);
                self.state.screen = Screen::Dashboard;
                self.state.status.set_error("Could not record this attempt");
                return;
            }
        };

        let saved = self.store.append(result.clone());
        self.state.show_review(result, Screen::Dashboard);
        match saved {
            Ok(()) => self.state.status.set_message("Saved to history"),
            Err(e) => {
                tracing::error!("Failed to save result: {:#}", e);
                self.state.status.set_error("Result shown but not saved to history");
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
        // drops the countdown task with the screen
        self.state.quiz = None;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
        let _ = self.restore_terminal();
    }
}
