//! Clinical observation input form.
//!
//! Numeric attributes are typed in and range-checked on submit; enum
//! attributes are cycled through a fixed option list, so a value
//! outside the declared domain cannot be entered at all.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{ChestPainType, ClinicalObservation, RestingEcg, Sex, StSlope};
use crate::tui::styles::ClinicTheme;

/// Input widget kind for one form field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Whole-number entry with an inclusive range
    Integer { value: String, min: u32, max: u32 },
    /// Decimal entry with an inclusive range
    Decimal { value: String, min: f64, max: f64 },
    /// Selection cycled through a fixed option list
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub input: FieldInput,
}

/// Observation form state
pub struct ObservationFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

fn integer_field(label: &'static str, hint: &'static str, min: u32, max: u32) -> FormField {
    FormField {
        label,
        hint,
        input: FieldInput::Integer {
            value: String::new(),
            min,
            max,
        },
    }
}

fn decimal_field(label: &'static str, hint: &'static str, min: f64, max: f64) -> FormField {
    FormField {
        label,
        hint,
        input: FieldInput::Decimal {
            value: String::new(),
            min,
            max,
        },
    }
}

fn choice_field(label: &'static str, hint: &'static str, options: Vec<&'static str>) -> FormField {
    FormField {
        label,
        hint,
        input: FieldInput::Choice {
            options,
            selected: 0,
        },
    }
}

impl Default for ObservationFormState {
    fn default() -> Self {
        // Field order mirrors the feature vector contract.
        Self {
            fields: vec![
                integer_field("Age", "years (20-80)", 20, 80),
                choice_field("Sex", "", Sex::ALL.iter().map(|s| s.label()).collect()),
                choice_field(
                    "Chest Pain Type",
                    "",
                    ChestPainType::ALL.iter().map(|c| c.label()).collect(),
                ),
                integer_field("Resting BP", "mmHg (60-200)", 60, 200),
                integer_field("Cholesterol", "mg/dl (60-600)", 60, 600),
                choice_field("Fasting Sugar > 120", "", vec!["No", "Yes"]),
                choice_field(
                    "Resting ECG",
                    "",
                    RestingEcg::ALL.iter().map(|e| e.label()).collect(),
                ),
                integer_field("Max Heart Rate", "bpm (60-220)", 60, 220),
                choice_field("Exercise Angina", "", vec!["No", "Yes"]),
                decimal_field("Oldpeak", "ST depression (0.0-6.0)", 0.0, 6.0),
                choice_field(
                    "ST Slope",
                    "",
                    StSlope::ALL.iter().map(|s| s.label()).collect(),
                ),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl ObservationFormState {
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

    /// Add a character to the current field (numeric fields only)
    pub fn input_char(&mut self, c: char) {
        match &mut self.fields[self.selected_field].input {
            FieldInput::Integer { value, .. } if c.is_ascii_digit() => {
                value.push(c);
                self.error_message = None;
            }
            FieldInput::Decimal { value, .. } if c.is_ascii_digit() || c == '.' => {
                value.push(c);
                self.error_message = None;
            }
            _ => {}
        }
    }

    /// Delete the last character of the current field
    pub fn delete_char(&mut self) {
        match &mut self.fields[self.selected_field].input {
            FieldInput::Integer { value, .. } | FieldInput::Decimal { value, .. } => {
                value.pop();
            }
            FieldInput::Choice { .. } => {}
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].input {
            FieldInput::Integer { value, .. } | FieldInput::Decimal { value, .. } => value.clear(),
            FieldInput::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Cycle the current choice field backwards
    pub fn cycle_prev(&mut self) {
        if let FieldInput::Choice { options, selected } =
            &mut self.fields[self.selected_field].input
        {
            *selected = if *selected == 0 {
                options.len() - 1
            } else {
                *selected - 1
            };
            self.error_message = None;
        }
    }

    /// Cycle the current choice field forwards
    pub fn cycle_next(&mut self) {
        if let FieldInput::Choice { options, selected } =
            &mut self.fields[self.selected_field].input
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    fn integer_value(&self, index: usize) -> Result<u32, String> {
        let field = &self.fields[index];
        match &field.input {
            FieldInput::Integer { value, min, max } => {
                let parsed: u32 = value
                    .parse()
                    .map_err(|_| format!("{}: Invalid number", field.label))?;
                if parsed < *min || parsed > *max {
                    return Err(format!(
                        "{}: Value must be between {} and {}",
                        field.label, min, max
                    ));
                }
                Ok(parsed)
            }
            _ => Err(format!("{}: Not a numeric field", field.label)),
        }
    }

    fn decimal_value(&self, index: usize) -> Result<f64, String> {
        let field = &self.fields[index];
        match &field.input {
            FieldInput::Decimal { value, min, max } => {
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| format!("{}: Invalid number", field.label))?;
                if parsed < *min || parsed > *max {
                    return Err(format!(
                        "{}: Value must be between {} and {}",
                        field.label, min, max
                    ));
                }
                Ok(parsed)
            }
            _ => Err(format!("{}: Not a decimal field", field.label)),
        }
    }

    fn choice_value(&self, index: usize) -> Result<usize, String> {
        let field = &self.fields[index];
        match &field.input {
            FieldInput::Choice { selected, .. } => Ok(*selected),
            _ => Err(format!("{}: Not a choice field", field.label)),
        }
    }

    /// Validate and convert the form into a clinical observation.
    ///
    /// # Errors
    /// Returns the first parse or range error, labeled with the field.
    pub fn to_observation(&self) -> Result<ClinicalObservation, String> {
        Ok(ClinicalObservation {
            age: self.integer_value(0)?,
            sex: Sex::ALL[self.choice_value(1)?],
            chest_pain_type: ChestPainType::ALL[self.choice_value(2)?],
            resting_bp: self.integer_value(3)?,
            cholesterol: self.integer_value(4)?,
            fasting_blood_sugar_high: self.choice_value(5)? == 1,
            resting_ecg: RestingEcg::ALL[self.choice_value(6)?],
            max_heart_rate: self.integer_value(7)?,
            exercise_induced_angina: self.choice_value(8)? == 1,
            oldpeak: self.decimal_value(9)?,
            st_slope: StSlope::ALL[self.choice_value(10)?],
        })
    }

    /// Load sample data (the baseline observation from the model docs)
    pub fn load_sample_data(&mut self) {
        let numeric = [(0, "40"), (3, "120"), (4, "200"), (7, "150"), (9, "0.0")];
        for (i, val) in numeric {
            match &mut self.fields[i].input {
                FieldInput::Integer { value, .. } | FieldInput::Decimal { value, .. } => {
                    *value = val.to_string();
                }
                FieldInput::Choice { .. } => {}
            }
        }
        for i in [1, 2, 5, 6, 8, 10] {
            if let FieldInput::Choice { selected, .. } = &mut self.fields[i].input {
                *selected = 0;
            }
        }
        self.error_message = None;
    }
}

/// Render the observation input form
pub fn render_form(f: &mut Frame, area: Rect, state: &ObservationFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Heart Disease Risk Screening", ClinicTheme::title()),
        Span::styled(" │ Clinical Measurements", ClinicTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &ObservationFormState) {
    // Two-column layout
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            ClinicTheme::border_focused()
        } else {
            ClinicTheme::border()
        };

        let title_style = if is_selected {
            ClinicTheme::focused()
        } else {
            ClinicTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = Paragraph::new(field_line(field, is_selected)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn field_line(field: &FormField, is_selected: bool) -> Line<'_> {
    match &field.input {
        FieldInput::Integer { value, .. } | FieldInput::Decimal { value, .. } => {
            let value_display = if value.is_empty() {
                Span::styled(field.hint, ClinicTheme::text_muted())
            } else {
                Span::styled(value.as_str(), ClinicTheme::text())
            };
            Line::from(vec![
                Span::raw(" "),
                value_display,
                if is_selected {
                    Span::styled("▌", ClinicTheme::focused())
                } else {
                    Span::raw("")
                },
            ])
        }
        FieldInput::Choice { options, selected } => {
            let arrow_style = if is_selected {
                ClinicTheme::key_hint()
            } else {
                ClinicTheme::text_muted()
            };
            Line::from(vec![
                Span::raw(" "),
                Span::styled("◂ ", arrow_style),
                Span::styled(options[*selected], ClinicTheme::text()),
                Span::styled(" ▸", arrow_style),
            ])
        }
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &ObservationFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ClinicTheme::danger()),
            Span::styled(err.clone(), ClinicTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", ClinicTheme::key_hint()),
            Span::styled("Navigate ", ClinicTheme::key_desc()),
            Span::styled("[◂▸] ", ClinicTheme::key_hint()),
            Span::styled("Change ", ClinicTheme::key_desc()),
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Predict ", ClinicTheme::key_desc()),
            Span::styled("[S] ", ClinicTheme::key_hint()),
            Span::styled("Sample Data ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Quit", ClinicTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_maps_to_baseline_observation() {
        let mut form = ObservationFormState::default();
        form.load_sample_data();

        let obs = form.to_observation().expect("sample data is valid");
        assert_eq!(obs.age, 40);
        assert_eq!(obs.sex, Sex::Male);
        assert_eq!(obs.chest_pain_type, ChestPainType::TypicalAngina);
        assert_eq!(obs.resting_bp, 120);
        assert_eq!(obs.cholesterol, 200);
        assert!(!obs.fasting_blood_sugar_high);
        assert_eq!(obs.resting_ecg, RestingEcg::Normal);
        assert_eq!(obs.max_heart_rate, 150);
        assert!(!obs.exercise_induced_angina);
        assert!((obs.oldpeak - 0.0).abs() < f64::EPSILON);
        assert_eq!(obs.st_slope, StSlope::Upsloping);
    }

    #[test]
    fn test_empty_numeric_field_is_an_error() {
        let form = ObservationFormState::default();
        let err = form.to_observation().expect_err("empty form is invalid");
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let mut form = ObservationFormState::default();
        form.load_sample_data();
        if let FieldInput::Integer { value, .. } = &mut form.fields[0].input {
            *value = "19".to_string();
        }
        let err = form.to_observation().expect_err("age 19 is out of range");
        assert!(err.contains("between 20 and 80"));
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut form = ObservationFormState::default();
        form.selected_field = 2; // chest pain type, 4 options

        form.cycle_prev();
        let obs_err = form.to_observation(); // numeric fields still empty
        assert!(obs_err.is_err());
        if let FieldInput::Choice { selected, options } = &form.fields[2].input {
            assert_eq!(*selected, options.len() - 1);
        } else {
            panic!("field 2 should be a choice");
        }

        form.cycle_next();
        if let FieldInput::Choice { selected, .. } = &form.fields[2].input {
            assert_eq!(*selected, 0);
        } else {
            panic!("field 2 should be a choice");
        }
    }

    #[test]
    fn test_input_char_filters_non_numeric() {
        let mut form = ObservationFormState::default();
        form.input_char('4');
        form.input_char('x');
        form.input_char('2');
        if let FieldInput::Integer { value, .. } = &form.fields[0].input {
            assert_eq!(value, "42");
        } else {
            panic!("field 0 should be an integer");
        }
    }

    #[test]
    fn test_choice_selection_maps_booleans() {
        let mut form = ObservationFormState::default();
        form.load_sample_data();
        form.selected_field = 5; // fasting blood sugar
        form.cycle_next();

        let obs = form.to_observation().expect("valid form");
        assert!(obs.fasting_blood_sugar_high);
    }
}
