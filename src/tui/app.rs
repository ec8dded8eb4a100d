//! Main TUI application state machine.
//!
//! Handles:
//! - Form / result navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::logistic::LogisticModel;
use crate::application::PredictionService;
use crate::config::AppConfig;
use crate::ports::ChurnClassifier;
use crate::ChurnError;

use super::ui::{
    form::{render_form, ChurnFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Where the current submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Form is editable
    Idle,
    /// Form submitted, waiting for the classifier
    Submitted,
    /// Prediction (or its error) is on screen
    DisplayingResult,
}

/// Main application state
pub struct App<C>
where
    C: ChurnClassifier,
{
    /// Whether the app should quit
    should_quit: bool,

    /// Prediction service holding the shared model
    service: PredictionService<C>,

    /// One-line description of the loaded model for the header
    model_summary: String,

    /// Form state; kept across submissions
    form_state: ChurnFormState,

    /// Result screen state
    result_state: ResultState,

    /// Submission waiting to be scored on the next loop turn
    pending: bool,
}

impl App<LogisticModel> {
    /// Create a new application, loading the model named by `config`.
    ///
    /// # Errors
    /// Returns error if the model artifact is missing, fails its digest
    /// check, or cannot be parsed.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let model =
            LogisticModel::load_verified(&config.model_path, config.model_sha256.as_deref())
                .map_err(ChurnError::from)?;

        let short_digest = model.digest().get(..12).unwrap_or(model.digest());
        let summary = format!("{} (sha256 {short_digest})", model.source().display());

        Ok(Self::with_dependencies(Arc::new(model), summary))
    }
}

impl<C> App<C>
where
    C: ChurnClassifier,
{
    /// Create application with an injected classifier.
    pub fn with_dependencies(classifier: Arc<C>, model_summary: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            service: PredictionService::new(classifier),
            model_summary: model_summary.into(),
            form_state: ChurnFormState::default(),
            result_state: ResultState::default(),
            pending: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.pending {
                // The "Predicting" frame is on screen; score now.
                self.process_pending();
                continue;
            }

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the current screen into `f`.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        match self.phase() {
            SessionPhase::Idle => {
                render_form(f, chunks[0], &self.form_state, &self.model_summary);
            }
            SessionPhase::Submitted | SessionPhase::DisplayingResult => {
                render_result(f, chunks[0], &self.result_state);
            }
        }

        render_disclaimer(f, chunks[1]);
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.result_state {
            ResultState::Idle => SessionPhase::Idle,
            ResultState::Predicting { .. } => SessionPhase::Submitted,
            ResultState::Complete { .. } | ResultState::Error { .. } => {
                SessionPhase::DisplayingResult
            }
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.phase() {
            SessionPhase::Idle => self.handle_form_key(key),
            SessionPhase::Submitted => {}
            SessionPhase::DisplayingResult => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.prev_option();
            }
            KeyCode::Right => {
                self.form_state.next_option();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form_state = ChurnFormState::default();
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
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            self.result_state = ResultState::Idle;
        }
    }

    fn submit_form(&mut self) {
        match self.form_state.to_record() {
            Ok(record) => {
                self.form_state.error_message = None;
                self.result_state = ResultState::Predicting { record };
                self.pending = true;
            }
            Err(e) => {
                tracing::warn!("Rejected form submission: {}", e);
                self.form_state.error_message = Some(e);
            }
        }
    }

    /// Score the submitted record and move to the result screen.
    fn process_pending(&mut self) {
        self.pending = false;

        let record = match std::mem::take(&mut self.result_state) {
            ResultState::Predicting { record } => record,
            other => {
                self.result_state = other;
                return;
            }
        };

        self.result_state = match self.service.predict(&record) {
            Ok(prediction) => ResultState::Complete { record, prediction },
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                ResultState::Error {
                    record,
                    message: e.to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stubs::{FailingClassifier, FixedClassifier, LabelOnlyClassifier};
    use crate::domain::ChurnLabel;
    use ratatui::backend::TestBackend;

    fn screen_text<C: ChurnClassifier>(app: &App<C>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App<impl ChurnClassifier>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn submit(app: &mut App<impl ChurnClassifier>) {
        press(app, KeyCode::Enter);
        assert_eq!(app.phase(), SessionPhase::Submitted);
        app.process_pending();
    }

    #[test]
    fn test_form_renders_all_sections() {
        let app = App::with_dependencies(Arc::new(LabelOnlyClassifier(ChurnLabel::No)), "stub");
        let text = screen_text(&app);

        assert!(text.contains("Telco Customer Churn Prediction"));
        assert!(text.contains("Customer Demographics"));
        assert!(text.contains("Service Details"));
        assert!(text.contains("Streaming & Contract"));
        assert!(text.contains("Tenure (Months)"));
        assert!(text.contains("Payment Method"));
    }

    #[test]
    fn test_positive_prediction_with_probability() {
        let mut app = App::with_dependencies(
            Arc::new(FixedClassifier {
                label: ChurnLabel::Yes,
                probability: 0.73,
            }),
            "stub",
        );

        submit(&mut app);
        assert_eq!(app.phase(), SessionPhase::DisplayingResult);

        let text = screen_text(&app);
        assert!(text.contains("⚠ Churn Prediction: YES"));
        assert!(text.contains("Churn Probability: 73.00%"));
        assert!(text.contains("Input Data"));
        assert!(text.contains("MonthlyCharges"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_label_only_model_hides_probability() {
        let mut app =
            App::with_dependencies(Arc::new(LabelOnlyClassifier(ChurnLabel::No)), "stub");

        submit(&mut app);
        let text = screen_text(&app);
        assert!(text.contains("✔ Churn Prediction: NO"));
        assert!(!text.contains("Churn Probability"));
    }

    #[test]
    fn test_failure_is_shown_and_session_continues() {
        let mut app = App::with_dependencies(Arc::new(FailingClassifier), "stub");

        submit(&mut app);
        assert_eq!(app.phase(), SessionPhase::DisplayingResult);
        assert!(!app.should_quit());

        let text = screen_text(&app);
        assert!(text.contains("An error occurred during prediction"));
        assert!(text.contains("exploded"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.phase(), SessionPhase::Idle);
        assert!(!app.should_quit());

        submit(&mut app);
        assert_eq!(app.phase(), SessionPhase::DisplayingResult);
    }

    #[test]
    fn test_invalid_input_stays_on_form() {
        let mut app =
            App::with_dependencies(Arc::new(LabelOnlyClassifier(ChurnLabel::No)), "stub");

        // Wrap from the first field to MonthlyCharges.
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.phase(), SessionPhase::Idle);
        let text = screen_text(&app);
        assert!(text.contains("Monthly Charges: -5 must not be negative"));
    }

    #[test]
    fn test_fractional_tenure_is_rejected() {
        let mut app =
            App::with_dependencies(Arc::new(LabelOnlyClassifier(ChurnLabel::No)), "stub");

        for _ in 0..4 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Delete);
        for c in "1.5".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.phase(), SessionPhase::Idle);
        let text = screen_text(&app);
        assert!(text.contains("Tenure (Months): Must be a whole number"));
    }

    #[test]
    fn test_form_values_survive_a_round_trip() {
        let mut app =
            App::with_dependencies(Arc::new(LabelOnlyClassifier(ChurnLabel::No)), "stub");

        press(&mut app, KeyCode::Right); // gender -> Female
        submit(&mut app);
        press(&mut app, KeyCode::Enter);

        let record = app.form_state.to_record().expect("valid");
        assert_eq!(record.gender, crate::domain::Gender::Female);

        press(&mut app, KeyCode::Char('r'));
        let record = app.form_state.to_record().expect("valid");
        assert_eq!(record, crate::CustomerFeatureRecord::default());
    }

    #[test]
    fn test_quit_keys() {
        let mut app =
            App::with_dependencies(Arc::new(LabelOnlyClassifier(ChurnLabel::No)), "stub");
        submit(&mut app);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_missing_model_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            model_path: dir.path().join("best_churn_model.json"),
            ..AppConfig::default()
        };

        let err = match App::new(&config) {
            Ok(_) => panic!("startup must fail without a model"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_bundled_model_starts() {
        let app = App::new(&AppConfig::default()).expect("bundled model loads");
        assert!(app.model_summary.contains("churn_model.json"));
    }
}
