//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{DecisionThreshold, PredictionResult};
use crate::tui::styles::ClinicTheme;

/// Outcome shown on the result screen.
#[derive(Debug, Clone)]
pub enum ResultState {
    /// Prediction completed
    Complete { result: PredictionResult },
    /// Prediction failed; no default result is ever substituted
    Failed { message: String },
}

/// Render the prediction result view
pub fn render_result(
    f: &mut Frame,
    area: Rect,
    state: &ResultState,
    threshold: DecisionThreshold,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Complete { result } => render_complete(f, chunks[1], result, threshold),
        ResultState::Failed { message } => render_failed(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled("Prediction Result", ClinicTheme::title()),
        Span::styled(" │ Heart Disease Risk", ClinicTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_complete(
    f: &mut Frame,
    area: Rect,
    result: &PredictionResult,
    threshold: DecisionThreshold,
) {
    let block = Block::default()
        .title(Span::styled(" Risk Assessment ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk level
            Constraint::Length(4), // Probability gauge
            Constraint::Length(2), // Threshold line
            Constraint::Min(0),    // Recommendations
        ])
        .margin(1)
        .split(inner);

    let risk_style = ClinicTheme::risk_level(result.risk_level);

    let risk_display = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Risk Level: {}", result.risk_level),
            risk_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            result.risk_level.description(),
            ClinicTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    let prob_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Disease Probability ",
                    ClinicTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(ClinicTheme::border()),
        )
        .gauge_style(risk_style)
        .percent(result.probability_percent.clamp(0.0, 100.0) as u16)
        .label(format!("{:.2}%", result.probability_percent));
    f.render_widget(prob_gauge, chunks[1]);

    let threshold_line = Paragraph::new(Line::from(vec![
        Span::styled("Decision threshold: ", ClinicTheme::text_secondary()),
        Span::styled(
            format!("{:.0}%", threshold.value() * 100.0),
            ClinicTheme::text(),
        ),
        Span::styled("   Evaluated: ", ClinicTheme::text_secondary()),
        Span::styled(
            result.evaluated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ClinicTheme::text_muted(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(threshold_line, chunks[2]);

    let mut lines = vec![Line::from(Span::styled(
        "Recommendations",
        ClinicTheme::subtitle(),
    ))];
    for item in result.risk_level.recommendations() {
        lines.push(Line::from(vec![
            Span::styled("  • ", risk_style),
            Span::styled(*item, ClinicTheme::text()),
        ]));
    }
    let recommendations = Paragraph::new(lines);
    f.render_widget(recommendations, chunks[3]);
}

fn render_failed(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Prediction Failed", ClinicTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, ClinicTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ClinicTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[N] ", ClinicTheme::key_hint()),
            Span::styled("New Prediction ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Back", ClinicTheme::key_desc()),
        ]),
        ResultState::Failed { .. } => Line::from(vec![
            Span::styled("[Enter] ", ClinicTheme::key_hint()),
            Span::styled("Back to Form ", ClinicTheme::key_desc()),
            Span::styled("[Esc] ", ClinicTheme::key_hint()),
            Span::styled("Back", ClinicTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(footer, area);
}
