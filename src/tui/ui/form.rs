//! Customer data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{CustomerFeatureRecord, FeatureDomain, FeatureValue, FEATURES};
use crate::tui::styles::ChurnTheme;

/// Form section, rendered as a titled box with two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Demographics,
    Service,
    StreamingContract,
}

impl Section {
    const ALL: [Section; 3] = [Self::Demographics, Self::Service, Self::StreamingContract];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Demographics => "Customer Demographics",
            Self::Service => "Service Details",
            Self::StreamingContract => "Streaming & Contract",
        }
    }
}

/// Widget backing a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Select box over the column's labels
    Select {
        options: &'static [&'static str],
        selected: usize,
    },
    /// 0/1 flag displayed as No/Yes
    Flag { on: bool },
    /// Typed number
    Number { value: String, integer: bool },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    /// Dataset column name
    pub key: &'static str,
    pub label: &'static str,
    pub section: Section,
    /// 0 = left, 1 = right
    pub column: usize,
    pub input: FieldInput,
}

/// Field placement, in navigation order.
const LAYOUT: [(&str, &str, Section, usize); 19] = [
    ("gender", "Gender", Section::Demographics, 0),
    ("SeniorCitizen", "Senior Citizen", Section::Demographics, 0),
    ("Partner", "Partner", Section::Demographics, 1),
    ("Dependents", "Dependents", Section::Demographics, 1),
    ("tenure", "Tenure (Months)", Section::Service, 0),
    ("PhoneService", "Phone Service", Section::Service, 0),
    ("MultipleLines", "Multiple Lines", Section::Service, 0),
    ("InternetService", "Internet Service", Section::Service, 0),
    ("OnlineSecurity", "Online Security", Section::Service, 1),
    ("OnlineBackup", "Online Backup", Section::Service, 1),
    ("DeviceProtection", "Device Protection", Section::Service, 1),
    ("TechSupport", "Tech Support", Section::Service, 1),
    ("StreamingTV", "Streaming TV", Section::StreamingContract, 0),
    ("StreamingMovies", "Streaming Movies", Section::StreamingContract, 0),
    ("Contract", "Contract", Section::StreamingContract, 0),
    ("PaperlessBilling", "Paperless Billing", Section::StreamingContract, 1),
    ("PaymentMethod", "Payment Method", Section::StreamingContract, 1),
    ("MonthlyCharges", "Monthly Charges", Section::StreamingContract, 1),
    ("TotalCharges", "Total Charges", Section::StreamingContract, 1),
];

/// Width of the label column.
const LABEL_WIDTH: usize = 19;

fn initial_input(domain: FeatureDomain) -> FieldInput {
    match domain {
        FeatureDomain::Choice(options) => FieldInput::Select {
            options,
            selected: 0,
        },
        FeatureDomain::Flag => FieldInput::Flag { on: false },
        FeatureDomain::Count { .. } => FieldInput::Number {
            value: "1".to_string(),
            integer: true,
        },
        FeatureDomain::Amount => FieldInput::Number {
            value: "0.0".to_string(),
            integer: false,
        },
    }
}

/// Customer form state
pub struct ChurnFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for ChurnFormState {
    fn default() -> Self {
        let fields = LAYOUT
            .iter()
            .filter_map(|(key, label, section, column)| {
                let spec = FEATURES.iter().find(|f| f.name == *key)?;
                Some(FormField {
                    key: spec.name,
                    label: *label,
                    section: *section,
                    column: *column,
                    input: initial_input(spec.domain),
                })
            })
            .collect();

        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }
}

impl ChurnFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Cycle the current select box forward
    pub fn next_option(&mut self) {
        match &mut self.fields[self.selected_field].input {
            FieldInput::Select { options, selected } => {
                *selected = (*selected + 1) % options.len();
            }
            FieldInput::Flag { on } => *on = !*on,
            FieldInput::Number { .. } => return,
        }
        self.error_message = None;
    }

    /// Cycle the current select box backward
    pub fn prev_option(&mut self) {
        match &mut self.fields[self.selected_field].input {
            FieldInput::Select { options, selected } => {
                *selected = if *selected == 0 {
                    options.len() - 1
                } else {
                    *selected - 1
                };
            }
            FieldInput::Flag { on } => *on = !*on,
            FieldInput::Number { .. } => return,
        }
        self.error_message = None;
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Number { value, .. } = &mut self.fields[self.selected_field].input {
            if c.is_ascii_digit() || c == '-' || c == '.' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldInput::Number { value, .. } = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current numeric field
    pub fn clear_field(&mut self) {
        if let FieldInput::Number { value, .. } = &mut self.fields[self.selected_field].input {
            value.clear();
        }
    }

    /// Convert the current widget values into dataset columns.
    ///
    /// # Errors
    /// Returns a message naming the first field whose text is not a number.
    pub fn to_columns(&self) -> Result<Vec<(&'static str, FeatureValue)>, String> {
        self.fields
            .iter()
            .map(|field| -> Result<(&'static str, FeatureValue), String> {
                let value = match &field.input {
                    FieldInput::Select { options, selected } => {
                        FeatureValue::Text(options[*selected].to_string())
                    }
                    FieldInput::Flag { on } => FeatureValue::Int(i64::from(*on)),
                    FieldInput::Number { value, integer: true } => value
                        .trim()
                        .parse::<i64>()
                        .map(FeatureValue::Int)
                        .map_err(|_| format!("{}: Must be a whole number", field.label))?,
                    FieldInput::Number { value, integer: false } => value
                        .trim()
                        .parse::<f64>()
                        .map(FeatureValue::Float)
                        .map_err(|_| format!("{}: Invalid number", field.label))?,
                };
                Ok((field.key, value))
            })
            .collect()
    }

    /// Validate and convert to a CustomerFeatureRecord
    pub fn to_record(&self) -> Result<CustomerFeatureRecord, String> {
        let columns = self.to_columns()?;
        CustomerFeatureRecord::from_columns(&columns).map_err(|errors| {
            errors
                .iter()
                .map(|e| self.humanize(e))
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    /// Replace a leading column name with the field's label.
    fn humanize(&self, error: &str) -> String {
        self.fields
            .iter()
            .find_map(|f| {
                error
                    .strip_prefix(f.key)
                    .and_then(|rest| rest.strip_prefix(':'))
                    .map(|rest| format!("{}:{rest}", f.label))
            })
            .unwrap_or_else(|| error.to_string())
    }
}

/// Render the customer data input form
pub fn render_form(f: &mut Frame, area: Rect, state: &ChurnFormState, model_summary: &str) {
    let section_heights: Vec<Constraint> = Section::ALL
        .iter()
        .map(|section| {
            let rows = (0..2)
                .map(|col| {
                    state
                        .fields
                        .iter()
                        .filter(|fl| fl.section == *section && fl.column == col)
                        .count()
                })
                .max()
                .unwrap_or(0);
            Constraint::Length(rows as u16 + 2)
        })
        .collect();

    let mut constraints = vec![Constraint::Length(4)]; // Header
    constraints.extend(section_heights);
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3)); // Footer/error

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_form_header(f, chunks[0], model_summary);
    for (i, section) in Section::ALL.iter().enumerate() {
        render_section(f, chunks[i + 1], state, *section);
    }
    render_form_footer(f, chunks[chunks.len() - 1], state);
}

fn render_form_header(f: &mut Frame, area: Rect, model_summary: &str) {
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" ", ChurnTheme::text()),
            Span::styled("Telco Customer Churn Prediction", ChurnTheme::title()),
            Span::styled(" │ ", ChurnTheme::text_muted()),
            Span::styled(format!("Model: {model_summary}"), ChurnTheme::text_muted()),
        ]),
        Line::from(Span::styled(
            " Enter customer details to predict if they will churn.",
            ChurnTheme::text_secondary(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_section(f: &mut Frame, area: Rect, state: &ChurnFormState, section: Section) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", section.title()), ChurnTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ChurnTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    for (col, col_area) in columns.iter().enumerate() {
        let lines: Vec<Line> = state
            .fields
            .iter()
            .enumerate()
            .filter(|(_, fl)| fl.section == section && fl.column == col)
            .map(|(i, fl)| field_line(fl, i == state.selected_field))
            .collect();
        f.render_widget(Paragraph::new(lines), *col_area);
    }
}

fn field_line(field: &FormField, is_selected: bool) -> Line<'static> {
    let label_style = if is_selected {
        ChurnTheme::focused()
    } else {
        ChurnTheme::text_secondary()
    };
    let marker = if is_selected { "›" } else { " " };

    let mut spans = vec![
        Span::styled(marker, ChurnTheme::focused()),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label), label_style),
    ];

    match &field.input {
        FieldInput::Select { options, selected } => {
            let text = options[*selected];
            if is_selected {
                spans.push(Span::styled("◀ ", ChurnTheme::key_hint()));
                spans.push(Span::styled(text, ChurnTheme::text()));
                spans.push(Span::styled(" ▶", ChurnTheme::key_hint()));
            } else {
                spans.push(Span::styled(text, ChurnTheme::text()));
            }
        }
        FieldInput::Flag { on } => {
            let text = if *on { "Yes" } else { "No" };
            if is_selected {
                spans.push(Span::styled("◀ ", ChurnTheme::key_hint()));
                spans.push(Span::styled(text, ChurnTheme::text()));
                spans.push(Span::styled(" ▶", ChurnTheme::key_hint()));
            } else {
                spans.push(Span::styled(text, ChurnTheme::text()));
            }
        }
        FieldInput::Number { value, .. } => {
            spans.push(Span::styled(value.clone(), ChurnTheme::text()));
            if is_selected {
                spans.push(Span::styled("▌", ChurnTheme::focused()));
            }
        }
    }

    Line::from(spans)
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &ChurnFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ChurnTheme::danger()),
            Span::styled(err.clone(), ChurnTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ChurnTheme::key_hint()),
            Span::styled("Navigate ", ChurnTheme::key_desc()),
            Span::styled("[←→] ", ChurnTheme::key_hint()),
            Span::styled("Change ", ChurnTheme::key_desc()),
            Span::styled("[Enter] ", ChurnTheme::key_hint()),
            Span::styled("Predict Churn ", ChurnTheme::key_desc()),
            Span::styled("[R] ", ChurnTheme::key_hint()),
            Span::styled("Reset ", ChurnTheme::key_desc()),
            Span::styled("[Esc] ", ChurnTheme::key_hint()),
            Span::styled("Quit", ChurnTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ChurnTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contract, PaymentMethod, FEATURE_NAMES};

    fn select(state: &mut ChurnFormState, key: &str) {
        while state.fields[state.selected_field].key != key {
            state.next_field();
        }
    }

    fn type_value(state: &mut ChurnFormState, key: &str, text: &str) {
        select(state, key);
        state.clear_field();
        for c in text.chars() {
            state.input_char(c);
        }
    }

    #[test]
    fn test_default_form_builds_default_record() {
        let state = ChurnFormState::default();
        assert_eq!(state.fields.len(), 19);

        let record = state.to_record().expect("defaults are valid");
        assert_eq!(record, CustomerFeatureRecord::default());
    }

    #[test]
    fn test_fields_cover_schema_once() {
        let state = ChurnFormState::default();
        for name in FEATURE_NAMES {
            assert_eq!(state.fields.iter().filter(|f| f.key == name).count(), 1);
        }
    }

    #[test]
    fn test_option_cycling_updates_record() {
        let mut state = ChurnFormState::default();

        select(&mut state, "Contract");
        state.next_option();
        state.next_option();
        select(&mut state, "PaymentMethod");
        state.prev_option();
        select(&mut state, "SeniorCitizen");
        state.next_option();

        let record = state.to_record().expect("valid");
        assert_eq!(record.contract, Contract::TwoYear);
        assert_eq!(record.payment_method, PaymentMethod::CreditCard);
        assert!(record.senior_citizen);
    }

    #[test]
    fn test_numeric_entry() {
        let mut state = ChurnFormState::default();
        type_value(&mut state, "tenure", "24");
        type_value(&mut state, "MonthlyCharges", "70.35");
        type_value(&mut state, "TotalCharges", "1397.47");

        let record = state.to_record().expect("valid");
        assert_eq!(record.tenure, 24);
        assert!((record.monthly_charges - 70.35).abs() < 1e-9);
        assert!((record.total_charges - 1397.47).abs() < 1e-9);
    }

    #[test]
    fn test_negative_numbers_are_rejected() {
        for key in ["tenure", "MonthlyCharges", "TotalCharges"] {
            let mut state = ChurnFormState::default();
            type_value(&mut state, key, "-3");
            let err = state.to_record().expect_err("negative must fail");
            let label = state.fields.iter().find(|f| f.key == key).map(|f| f.label);
            assert!(err.starts_with(label.expect("field exists")), "{err}");
        }
    }

    #[test]
    fn test_tenure_bounds_and_format() {
        let mut state = ChurnFormState::default();
        type_value(&mut state, "tenure", "101");
        assert!(state.to_record().is_err());

        type_value(&mut state, "tenure", "1.5");
        let err = state.to_record().expect_err("fractional tenure must fail");
        assert_eq!(err, "Tenure (Months): Must be a whole number");

        type_value(&mut state, "tenure", "");
        let err = state.to_record().expect_err("empty must fail");
        assert!(err.contains("Tenure (Months)"));
    }

    #[test]
    fn test_letters_are_ignored_in_numbers() {
        let mut state = ChurnFormState::default();
        type_value(&mut state, "MonthlyCharges", "4a2");
        assert!((state.to_record().expect("valid").monthly_charges - 42.0).abs() < 1e-9);
    }
}
