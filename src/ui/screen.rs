// ============================================================================
// Screen - Rendu de l'écran principal
// ============================================================================
// Dessine l'interface TUI : header, graphique animé, footer
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, etc.)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Status};
use crate::ui::chart;

/// Dessine l'interface complète
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application (lecture seule, la frame est déjà calculée)
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Graphique
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : snapshot courant et indicateur de chargement
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Articulate Chart ")
        .title_alignment(Alignment::Center);

    let mut spans = match app.current_snapshot() {
        Some(path) => vec![
            Span::styled(
                format!("[{}/{}] ", app.current_index() + 1, app.snapshot_count()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(path.display().to_string()),
        ],
        None => vec![Span::styled(
            "Aucun snapshot",
            Style::default().fg(Color::Gray),
        )],
    };

    if app.is_loading_data() {
        let message = app
            .loading_message
            .clone()
            .unwrap_or_else(|| "Chargement...".to_string());
        spans.push(Span::styled(
            format!("  ⏳ {}", message),
            Style::default().fg(Color::Cyan),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : le graphique
// ============================================================================

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_frame() {
        Some(current) => chart::render_chart(frame, current, app.view().config(), area),
        None => {
            let message = if app.is_loading_data() {
                "Chargement des données..."
            } else {
                "Aucune donnée chargée"
            };
            chart::render_placeholder(frame, area, message);
        }
    }
}

// ============================================================================
// Footer : raccourcis, état, confirmation de quit
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        let mut spans = vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[n/p]", key_style),
            Span::raw(" Snapshot  "),
            Span::styled("[r]", key_style),
            Span::raw(" Reload  "),
            Span::styled("[Space]", key_style),
            Span::raw(" Animate  "),
            Span::styled("[e]", key_style),
            Span::raw(format!(" {}", app.view().config().easing.label())),
        ];

        match &app.status {
            Some(Status::Info(message)) => {
                spans.push(Span::raw("  │ "));
                spans.push(Span::styled(message.clone(), Style::default().fg(Color::Green)));
            }
            Some(Status::Error(message)) => {
                spans.push(Span::raw("  │ "));
                spans.push(Span::styled(
                    format!("✗ {}", message),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
            None => {}
        }

        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use std::path::PathBuf;
    use std::time::Instant;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_empty_app() {
        let app = App::new(Vec::new(), ChartConfig::default());
        let text = screen_text(&app);
        assert!(text.contains("Aucun snapshot"));
        assert!(text.contains("Aucune donnée chargée"));
    }

    #[test]
    fn test_render_loaded_snapshot() {
        let mut app = App::new(vec![PathBuf::from("acme.json")], ChartConfig::default());
        let data = json!({"symbol": "ACME", "points": [{"t": 0, "v": 10}, {"t": 60, "v": 12}]});
        let now = Instant::now();
        assert!(app.apply_loaded(0, data.as_object().unwrap(), now));
        app.tick(now);

        let text = screen_text(&app);
        assert!(text.contains("[1/1]"));
        assert!(text.contains("acme.json"));
        assert!(text.contains("ACME"));
        assert!(text.contains("Snapshot 1 chargé"));
    }

    #[test]
    fn test_render_quit_confirmation() {
        let mut app = App::new(Vec::new(), ChartConfig::default());
        app.request_quit();
        assert!(screen_text(&app).contains("à nouveau pour quitter"));
    }
}
