//! Game orchestration against a remote game service.
//!
//! [`Orchestrator`] drives a [`Session`] by issuing the service calls it asks
//! for. It can be used two ways:
//!
//! - call [`Orchestrator::start`], [`Orchestrator::new_game`] and
//!   [`Orchestrator::attempt_move`] directly; each runs its pipeline to
//!   completion
//! - hand it to [`Orchestrator::run`] with an intent channel and a snapshot
//!   channel, which keeps accepting intents while a call is in flight and
//!   drops the ones the session refuses

use crate::difficulty::Difficulty;
use crate::error::GameServiceError;
use crate::service::GameService;
use crate::session::{ServiceCall, Session, Snapshot};
use derive_new::new;
use futures::future::{BoxFuture, OptionFuture};
use std::sync::Arc;
use std::time::Duration;
use tictac_meow_board::{Board, Coord};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

/// Raw user actions forwarded by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start over with an empty board.
    NewGame,
    /// The player picked a cell.
    CellClicked(Coord),
    /// The player chose another AI strength.
    DifficultyChanged(Difficulty),
    /// Reload the server's current game.
    Refresh,
}

/// Tuning for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct OrchestratorSettings {
    /// Difficulty used until the caller changes it.
    pub difficulty: Difficulty,
    /// Pause before each AI request so the reply is perceptible. Cosmetic.
    pub ai_delay: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            ai_delay: Duration::from_millis(700),
        }
    }
}

type PendingCall = BoxFuture<'static, Result<Board, GameServiceError>>;

/// Sequences player moves and AI replies against a [`GameService`].
pub struct Orchestrator<S> {
    service: Arc<S>,
    session: Session,
    difficulty: Difficulty,
    ai_delay: Duration,
}

impl<S: GameService + 'static> Orchestrator<S> {
    /// Creates an orchestrator with no board loaded.
    pub fn new(service: Arc<S>, settings: OrchestratorSettings) -> Self {
        Self {
            service,
            session: Session::new(),
            difficulty: settings.difficulty,
            ai_delay: settings.ai_delay,
        }
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Copies the session for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot(self.difficulty)
    }

    /// Returns the difficulty the next AI turn will use.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty for subsequent AI turns.
    ///
    /// An AI turn already scheduled keeps the difficulty it was scheduled with.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!(from = %self.difficulty, to = %difficulty, "Difficulty changed");
        self.difficulty = difficulty;
    }

    /// Loads the server's current game.
    ///
    /// Dropping this future (or the ones below) before it completes leaves the
    /// session busy.
    #[instrument(skip(self))]
    pub async fn start(&mut self) {
        if let Some(call) = self.session.begin_fetch() {
            self.drive(call).await;
        }
    }

    /// Starts a fresh game. A no-op while busy.
    #[instrument(skip(self))]
    pub async fn new_game(&mut self) {
        if let Some(call) = self.session.begin_new_game() {
            self.drive(call).await;
        }
    }

    /// Plays the player's move at `row`, `col`, then the AI's reply.
    ///
    /// A no-op when the move is not legal right now.
    #[instrument(skip(self))]
    pub async fn attempt_move(&mut self, row: usize, col: usize) {
        let Some(coord) = Coord::new(row, col) else {
            debug!("Coordinate off the board, dropping move");
            return;
        };
        if let Some(call) = self.session.begin_move(coord) {
            self.drive(call).await;
        }
    }

    /// Runs the intent loop until the intent channel closes.
    ///
    /// Fetches the current game first. A snapshot is published after every
    /// intent and every service outcome.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
        snapshots: watch::Sender<Snapshot>,
    ) {
        info!("Starting game orchestration");

        let mut pending: Option<PendingCall> =
            self.session.begin_fetch().map(|call| self.dispatch(call));
        snapshots.send_replace(self.snapshot());

        loop {
            tokio::select! {
                Some(outcome) = OptionFuture::from(pending.as_mut()) => {
                    pending = self
                        .session
                        .resolve(outcome, self.difficulty)
                        .map(|call| self.dispatch(call));
                }
                intent = intents.recv() => {
                    let Some(intent) = intent else {
                        info!("Intent channel closed, stopping orchestration");
                        break;
                    };
                    if let Some(call) = self.handle(intent) {
                        pending = Some(self.dispatch(call));
                    }
                }
            }

            snapshots.send_replace(self.snapshot());
        }
    }

    fn handle(&mut self, intent: Intent) -> Option<ServiceCall> {
        debug!(?intent, busy = self.session.is_busy(), "Handling intent");
        match intent {
            Intent::NewGame => self.session.begin_new_game(),
            Intent::CellClicked(coord) => self.session.begin_move(coord),
            Intent::Refresh => self.session.begin_fetch(),
            Intent::DifficultyChanged(difficulty) => {
                self.set_difficulty(difficulty);
                None
            }
        }
    }

    /// Issues calls until the session stops asking for follow-ups.
    async fn drive(&mut self, first: ServiceCall) {
        let mut call = first;
        loop {
            let outcome = self.dispatch(call).await;
            match self.session.resolve(outcome, self.difficulty) {
                Some(next) => call = next,
                None => break,
            }
        }
    }

    fn dispatch(&self, call: ServiceCall) -> PendingCall {
        debug!(%call, "Dispatching service call");
        let service = Arc::clone(&self.service);
        let ai_delay = self.ai_delay;

        Box::pin(async move {
            match call {
                ServiceCall::FetchState => service.fetch_state().await,
                ServiceCall::StartNewGame => service.start_new_game().await,
                ServiceCall::SubmitMove(coord) => service.submit_move(coord).await,
                ServiceCall::RequestAiMove(difficulty) => {
                    if !ai_delay.is_zero() {
                        tokio::time::sleep(ai_delay).await;
                    }
                    service.request_ai_move(difficulty).await
                }
            }
        })
    }
}
