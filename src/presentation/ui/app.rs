//! Main application orchestrator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::controller::{DashboardController, DashboardRequest};
use crate::application::dashboard::DashboardEvent;
use crate::domain::entities::{FoodChanges, FoodId};
use crate::domain::errors::FoodError;
use crate::domain::ports::FoodRepositoryPort;
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::EventResult;
use crate::presentation::ui::dashboard_screen::{
    DashboardKeyResult, DashboardScreen, DashboardScreenState,
};
use crate::presentation::widgets::{BackendStatus, StatusMessage};

const STATUS_TICK: Duration = Duration::from_secs(1);

/// Backend operation, for status messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Load,
    Create,
    Update,
    Delete,
    ToggleAvailability,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => write!(f, "load foods"),
            Self::Create => write!(f, "create food"),
            Self::Update => write!(f, "update food"),
            Self::Delete => write!(f, "delete food"),
            Self::ToggleAvailability => write!(f, "change availability"),
        }
    }
}

/// Outcome of a spawned backend call, applied by the event loop only.
#[derive(Debug)]
enum Action {
    Applied {
        operation: Operation,
        event: DashboardEvent,
    },
    Failed {
        operation: Operation,
        error: FoodError,
    },
}

/// Terminal dashboard: owns the controller, the screen and the event loop.
pub struct App {
    controller: DashboardController,
    screen: DashboardScreenState,
    ui: UiConfig,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    exiting: bool,
}

impl App {
    /// Creates the app against `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn FoodRepositoryPort>, ui: UiConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            controller: DashboardController::new(repository),
            screen: DashboardScreenState::new(),
            ui,
            action_tx,
            action_rx,
            exiting: false,
        }
    }

    /// Loads the foods and runs until the user quits.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.spawn_load();
        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut status_interval = interval(STATUS_TICK);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.exiting = true;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = status_interval.tick() => {
                    if self.expire_status(Instant::now()) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(
            DashboardScreen::new(self.controller.state(), &self.ui),
            frame.area(),
            &mut self.screen,
        );
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                let len = self.controller.state().foods().len();
                match mouse.kind {
                    MouseEventKind::ScrollDown => self.screen.scroll_down(len),
                    MouseEventKind::ScrollUp => self.screen.scroll_up(len),
                    _ => {}
                }
                EventResult::Continue
            }
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        match self.screen.handle_key(key, self.controller.state()) {
            DashboardKeyResult::Quit => return EventResult::Exit,
            DashboardKeyResult::Consumed => {}
            DashboardKeyResult::Refresh => self.spawn_load(),
            DashboardKeyResult::OpenAddModal => {
                self.screen.reset_add_form();
                self.controller.toggle_add_modal();
            }
            DashboardKeyResult::CloseAddModal => self.controller.toggle_add_modal(),
            DashboardKeyResult::SubmitNew(food) => {
                self.controller.toggle_add_modal();
                self.spawn(Operation::Create, self.controller.add_request(food));
            }
            DashboardKeyResult::OpenEdit(food) => {
                self.screen.load_edit_form(&food);
                self.controller.open_edit(food);
            }
            DashboardKeyResult::CloseEditModal => self.controller.toggle_edit_modal(),
            DashboardKeyResult::SubmitEdit(changes) => self.submit_edit(changes),
            DashboardKeyResult::Delete(id) => self.spawn_delete(id),
            DashboardKeyResult::ToggleAvailability(id) => self.spawn_toggle_availability(id),
        }

        EventResult::Continue
    }

    fn submit_edit(&mut self, changes: FoodChanges) {
        match self.controller.update_request(changes) {
            Ok(request) => {
                self.controller.toggle_edit_modal();
                self.spawn(Operation::Update, request);
            }
            Err(error) => self.screen.set_status(StatusMessage::error(error.to_string())),
        }
    }

    fn spawn_load(&mut self) {
        self.screen.set_backend_status(BackendStatus::Loading);
        self.spawn(Operation::Load, self.controller.load_request());
    }

    fn spawn_delete(&self, id: FoodId) {
        self.spawn(Operation::Delete, self.controller.delete_request(id));
    }

    fn spawn_toggle_availability(&mut self, id: FoodId) {
        match self.controller.toggle_availability_request(id) {
            Ok(request) => self.spawn(Operation::ToggleAvailability, request),
            Err(error) => self.screen.set_status(StatusMessage::error(error.to_string())),
        }
    }

    /// Runs `request` off the loop; its outcome comes back as an [`Action`].
    fn spawn(&self, operation: Operation, request: DashboardRequest) {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match request.await {
                Ok(event) => Action::Applied { operation, event },
                Err(error) => Action::Failed { operation, error },
            };
            let _ = tx.send(action);
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Applied { operation, event } => {
                let message = match &event {
                    DashboardEvent::Loaded(foods) => format!("Loaded {} foods", foods.len()),
                    DashboardEvent::Created(food) => format!("Added {}", food.name()),
                    DashboardEvent::Updated(food) => format!("Saved {}", food.name()),
                    DashboardEvent::AvailabilityChanged(food) if food.is_available() => {
                        format!("{} is available", food.name())
                    }
                    DashboardEvent::AvailabilityChanged(food) => {
                        format!("{} is unavailable", food.name())
                    }
                    DashboardEvent::Deleted(id) => format!("Deleted food {id}"),
                    _ => operation.to_string(),
                };
                debug!(
                    %operation,
                    version = self.controller.state().version(),
                    "Applying backend result"
                );

                self.controller.apply(event);
                self.screen.sync_selection(self.controller.state().foods().len());
                self.screen.set_backend_status(BackendStatus::Ready);
                self.screen.set_status(StatusMessage::success(message));
            }
            Action::Failed { operation, error } => {
                warn!(%operation, error = %error, "Backend operation failed");
                if operation == Operation::Load {
                    self.screen.set_backend_status(BackendStatus::Error);
                }
                let mut text = format!("Failed to {operation}: {error}");
                if operation == Operation::Load && error.is_recoverable() {
                    text.push_str(" (r: retry)");
                }
                self.screen.set_status(StatusMessage::error(text));
            }
        }
    }

    fn expire_status(&mut self, now: Instant) -> bool {
        let ttl = Duration::from_secs(self.ui.status_duration);
        match self.screen.status() {
            Some(status) if status.is_expired(ttl, now) => {
                self.screen.clear_status();
                true
            }
            _ => false,
        }
    }
}
