//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{format_percent, ChurnPrediction, CustomerFeatureRecord};
use crate::tui::styles::ChurnTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A submission is waiting for the classifier
    Predicting { record: CustomerFeatureRecord },
    /// Completed with result
    Complete {
        record: CustomerFeatureRecord,
        prediction: ChurnPrediction,
    },
    /// Classifier failed
    Error {
        record: CustomerFeatureRecord,
        message: String,
    },
}

impl ResultState {
    fn record(&self) -> Option<&CustomerFeatureRecord> {
        match self {
            Self::Idle => None,
            Self::Predicting { record }
            | Self::Complete { record, .. }
            | Self::Error { record, .. } => Some(record),
        }
    }
}

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    if let Some(record) = state.record() {
        render_input_table(f, columns[0], record);
    }

    match state {
        ResultState::Idle => {}
        ResultState::Predicting { .. } => render_predicting(f, columns[1]),
        ResultState::Complete { prediction, .. } => render_prediction(f, columns[1], prediction),
        ResultState::Error { message, .. } => render_error(f, columns[1], message),
    }

    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ChurnTheme::text()),
        Span::styled("Telco Customer Churn Prediction", ChurnTheme::title()),
        Span::styled(" │ Result", ChurnTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(header, area);
}

/// The submitted row, one feature per line.
fn render_input_table(f: &mut Frame, area: Rect, record: &CustomerFeatureRecord) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<18}", "Feature"), ChurnTheme::header()),
            Span::styled("Value", ChurnTheme::header()),
        ]),
        Line::from(""),
    ];
    lines.extend(record.to_columns().into_iter().map(|(name, value)| {
        Line::from(vec![
            Span::styled(format!("{name:<18}"), ChurnTheme::text_secondary()),
            Span::styled(value.to_string(), ChurnTheme::text()),
        ])
    }));

    let table = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Input Data ", ChurnTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(table, area);
}

fn render_predicting(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Predicting churn...", ChurnTheme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Prediction Result ", ChurnTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &ChurnPrediction) {
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", ChurnTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Label
            Constraint::Length(2), // Probability text
            Constraint::Length(3), // Gauge
            Constraint::Min(0),    // Timestamp
        ])
        .margin(1)
        .split(inner);

    let label_style = ChurnTheme::churn_label(prediction.label);
    let icon = if prediction.label.is_churn() { "⚠" } else { "✔" };

    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {}", prediction.headline()),
            label_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            if prediction.label.is_churn() {
                "Customer is likely to leave"
            } else {
                "Customer is likely to stay"
            },
            ChurnTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    if let (Some(p), Some(line)) = (prediction.probability, prediction.probability_line()) {
        let text = Paragraph::new(Line::from(Span::styled(line, ChurnTheme::text())))
            .alignment(Alignment::Center);
        f.render_widget(text, chunks[1]);

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(ChurnTheme::border()),
            )
            .gauge_style(ChurnTheme::probability_gauge(p))
            .percent((p * 100.0).round().clamp(0.0, 100.0) as u16)
            .label(format_percent(p));
        f.render_widget(gauge, chunks[2]);
    }

    let timestamp = Paragraph::new(Line::from(Span::styled(
        format!(
            "Predicted at {}",
            prediction.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        ChurnTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(timestamp, chunks[3]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", ChurnTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(
            format!("An error occurred during prediction: {message}"),
            ChurnTheme::text(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Prediction Result ", ChurnTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(ChurnTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Predicting { .. } => Line::from(vec![Span::styled(
            "Processing...",
            ChurnTheme::text_muted(),
        )]),
        _ => Line::from(vec![
            Span::styled("[Enter] ", ChurnTheme::key_hint()),
            Span::styled("Back to Form ", ChurnTheme::key_desc()),
            Span::styled("[Ctrl+Q] ", ChurnTheme::key_hint()),
            Span::styled("Quit", ChurnTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(footer, area);
}
