//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation (form and result)
//! - Input event handling
//! - Service integration
//!
//! Prediction runs synchronously in the event handler: one observation
//! in, one result (or failure) out, no background work.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::LogisticModel;
use crate::application::PredictionService;
use crate::domain::DecisionThreshold;
use crate::ports::Classifier;
use crate::CardioscreenError;

use super::ui::{
    form::{render_form, ObservationFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

/// Main application state
pub struct App<C>
where
    C: Classifier,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Prediction service with the injected classifier
    service: PredictionService<C>,

    /// Observation form state
    form_state: ObservationFormState,

    /// Last prediction outcome (set on submit)
    result_state: Option<ResultState>,
}

impl App<LogisticModel> {
    /// Create a new application instance using the default adapter.
    ///
    /// Loads the model artifact once from `CARDIOSCREEN_MODEL_PATH`
    /// (default `models`) and reads the decision threshold from
    /// `CARDIOSCREEN_THRESHOLD` (default 0.7). A model that cannot be
    /// loaded is fatal; there is no fallback prediction path.
    ///
    /// # Errors
    /// Returns error if the model or configuration is invalid.
    pub fn new() -> Result<Self> {
        let model_path = std::env::var("CARDIOSCREEN_MODEL_PATH")
            .unwrap_or_else(|_| "models".to_string());
        let model_dir = Path::new(&model_path);

        if !model_dir.exists() {
            return Err(anyhow!(
                "Model path not found at {:?}. Set CARDIOSCREEN_MODEL_PATH to a directory containing model.json.",
                model_dir
            ));
        }

        let classifier = LogisticModel::load(model_dir)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {}", model_dir, e))?;

        let threshold = match std::env::var("CARDIOSCREEN_THRESHOLD") {
            Ok(raw) => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("CARDIOSCREEN_THRESHOLD is not a number: {raw:?}"))?;
                DecisionThreshold::new(value).map_err(|e| anyhow!(e))?
            }
            Err(_) => DecisionThreshold::default(),
        };

        tracing::info!("Decision threshold: {}", threshold.value());

        let service = PredictionService::new(Arc::new(classifier), threshold);
        Ok(Self::with_service(service))
    }
}

impl<C> App<C>
where
    C: Classifier,
{
    /// Create application with an injected service (Composition Root).
    ///
    /// Lets `main.rs` or tests construct the classifier externally.
    #[must_use]
    pub fn with_service(service: PredictionService<C>) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            form_state: ObservationFormState::default(),
            result_state: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Form => render_form(f, content_area, &self.form_state),
                    Screen::Result => {
                        if let Some(state) = &self.result_state {
                            render_result(f, content_area, state, self.service.threshold());
                        }
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Short poll to stay responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            Some(ResultState::Complete { .. }) => match key {
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = ObservationFormState::default();
                    self.screen = Screen::Form;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Form;
                }
                _ => {}
            },
            Some(ResultState::Failed { .. }) | None => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Form;
                }
                _ => {}
            },
        }
    }

    fn submit_form(&mut self) {
        let observation = match self.form_state.to_observation() {
            Ok(obs) => obs,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        if let Err(errors) = observation.validate() {
            self.form_state.error_message = Some(errors.join(", "));
            return;
        }

        // One synchronous prediction per submit. A classifier failure
        // surfaces as a failed result, never as a default risk level.
        match self.service.predict(&observation) {
            Ok(result) => {
                self.result_state = Some(ResultState::Complete { result });
            }
            Err(CardioscreenError::Classifier(e)) => {
                tracing::error!("Classifier failure: {}", e);
                self.result_state = Some(ResultState::Failed {
                    message: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.result_state = Some(ResultState::Failed {
                    message: e.to_string(),
                });
            }
        }
        self.screen = Screen::Result;
    }
}
