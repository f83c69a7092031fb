// ============================================================================
// Chart - Rendu du graphique d'une frame interpolée
// ============================================================================
// Dessine un graphique ligne (line chart) à partir d'une InterpolatedFrame
//
// RÈGLES :
// 1. Fonction pure de la frame, de la config et de la zone : aucune mutation
// 2. Jamais de panic : valeurs non finies remplacées, zone trop petite ignorée
// 3. Cas dégénérés :
//    - un seul point → ligne plate sur toute la largeur
//    - valeurs toutes égales → axe Y élargi à min_visible_range
//
// CONCEPTS RATATUI :
// 1. Widget : rendu direct dans un Buffer (testable sans terminal)
// 2. Chart / Dataset / Axis : graphique ligne
// 3. Gauge : progression de la transition
// ============================================================================

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Widget},
    Frame,
};

use crate::animation::InterpolatedFrame;
use crate::config::ChartConfig;

// ============================================================================
// Constantes
// ============================================================================

/// Couleurs pour une série en hausse / en baisse
const BULLISH_COLOR: Color = Color::Rgb(52, 208, 88); // Vert
const BEARISH_COLOR: Color = Color::Rgb(234, 74, 90); // Rouge

/// Taille minimale pour dessiner quoi que ce soit
const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 8;

/// Hauteur du header (bordures + une ligne de texte)
const HEADER_HEIGHT: u16 = 3;

// ============================================================================
// Helpers purs (calcul des points et des bornes)
// ============================================================================

/// Remplace les valeurs non finies par le milieu de la plage finie
///
/// Ne devrait jamais servir : le validateur refuse NaN et infini.
/// Si aucune valeur n'est finie, on utilise 0.
pub fn sanitize_values(values: &[f64]) -> Vec<f64> {
    let (min, max) = finite_range(values).unwrap_or((0.0, 0.0));
    let midpoint = min / 2.0 + max / 2.0;

    values
        .iter()
        .map(|&v| if v.is_finite() { v } else { midpoint })
        .collect()
}

/// Min et max des valeurs finies (None s'il n'y en a aucune)
fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Calcule les bornes de l'axe Y
///
/// - amplitude minimale : min_visible_range, centrée sur les valeurs
/// - marge : margin_ratio de l'amplitude, en haut et en bas
/// - ne descend pas sous 0 si toutes les valeurs sont positives
pub fn value_bounds(values: &[f64], config: &ChartConfig) -> (f64, f64) {
    let min_range = if config.min_visible_range.is_finite() && config.min_visible_range > 0.0 {
        config.min_visible_range
    } else {
        1.0
    };

    let (min, max) = finite_range(values).unwrap_or((0.0, 0.0));
    let all_positive = min >= 0.0;

    // Demi-amplitude : max - min peut déborder pour des extrêmes finis
    let center = min / 2.0 + max / 2.0;
    let half_range = (max / 2.0 - min / 2.0).max(min_range / 2.0);
    let half_span = half_range + 2.0 * half_range * config.margin_ratio.clamp(0.0, 1.0);

    let mut low = (center - half_span).max(-f64::MAX);
    let high = (center + half_span).min(f64::MAX);

    if all_positive {
        low = low.max(0.0);
    }

    if !low.is_finite() || !high.is_finite() || high <= low {
        return (-1.0, 1.0);
    }
    (low, high)
}

/// Convertit les valeurs en points (x, y) avec x normalisé dans [0, 1]
///
/// Un seul point est dessiné comme une ligne plate (0, v) → (1, v).
pub fn plot_points(values: &[f64]) -> Vec<(f64, f64)> {
    match values.len() {
        0 => Vec::new(),
        1 => vec![(0.0, values[0]), (1.0, values[0])],
        n => values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 / (n - 1) as f64, v))
            .collect(),
    }
}

/// Format des labels de l'axe X selon la durée couverte
fn time_format(span: (DateTime<Utc>, DateTime<Utc>)) -> &'static str {
    let seconds = (span.1 - span.0).num_seconds();
    if seconds < 24 * 60 * 60 {
        "%H:%M:%S"
    } else if seconds < 365 * 24 * 60 * 60 {
        "%d/%m"
    } else {
        "%m/%Y"
    }
}

/// Nombre de décimales des labels de l'axe Y selon l'amplitude
fn value_precision(low: f64, high: f64) -> usize {
    let range = high - low;
    if range >= 100.0 {
        0
    } else if range >= 1.0 {
        2
    } else {
        4
    }
}

// ============================================================================
// Widget
// ============================================================================

/// Widget ratatui qui dessine une InterpolatedFrame
pub struct ChartWidget<'a> {
    frame: &'a InterpolatedFrame,
    config: &'a ChartConfig,
}

impl<'a> ChartWidget<'a> {
    pub fn new(frame: &'a InterpolatedFrame, config: &'a ChartConfig) -> Self {
        Self { frame, config }
    }

    fn trend_color(&self) -> Color {
        match self.frame.change_percent() {
            Some(change) if change < 0.0 => BEARISH_COLOR,
            _ => BULLISH_COLOR,
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let label = if self.frame.symbol.is_empty() {
            "Sans symbole".to_string()
        } else {
            self.frame.symbol.clone()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" 📈 {} ", label));

        let values = sanitize_values(&self.frame.values);
        let color = self.trend_color();

        let mut spans = Vec::new();
        if let Some(&last) = values.last() {
            spans.push(Span::raw("Valeur: "));
            spans.push(Span::styled(
                format!("{:.2}", last),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(change) = self.frame.change_percent() {
            let arrow = if change >= 0.0 { "▲" } else { "▼" };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} {:+.2}%", arrow, change),
                Style::default().fg(color),
            ));
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_graph(&self, area: Rect, buf: &mut Buffer) {
        let values = sanitize_values(&self.frame.values);
        let (low, high) = value_bounds(&values, self.config);

        // Aucun point hors des bornes
        let points: Vec<(f64, f64)> = plot_points(&values)
            .into_iter()
            .map(|(x, y)| (x.clamp(0.0, 1.0), y.clamp(low, high)))
            .collect();

        let datasets = vec![Dataset::default()
            .name(self.frame.symbol.as_str())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.trend_color()))
            .data(&points)];

        let format = time_format(self.frame.time_span);
        let x_axis = Axis::default()
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, 1.0])
            .labels(vec![
                Span::raw(self.frame.time_span.0.format(format).to_string()),
                Span::raw(self.frame.time_span.1.format(format).to_string()),
            ]);

        let precision = value_precision(low, high);
        let y_axis = Axis::default()
            .style(Style::default().fg(Color::Gray))
            .bounds([low, high])
            .labels(vec![
                Span::raw(format!("{:.*}", precision, low)),
                Span::raw(format!("{:.*}", precision, low / 2.0 + high / 2.0)),
                Span::raw(format!("{:.*}", precision, high)),
            ]);

        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }

    fn render_progress(&self, area: Rect, buf: &mut Buffer) {
        if !self.frame.animating {
            return;
        }

        // Gauge::ratio panique hors de [0, 1]
        let ratio = if self.frame.progress.is_finite() {
            self.frame.progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(ratio)
            .label(format!("Transition {:.0}%", ratio * 100.0))
            .render(area, buf);
    }
}

impl<'a> Widget for ChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return;
        }

        if self.frame.values.is_empty() {
            render_no_data(area, buf, "Pas de données à afficher");
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Min(0),                // Graphique
                Constraint::Length(1),             // Progression
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_graph(chunks[1], buf);
        self.render_progress(chunks[2], buf);
    }
}

// ============================================================================
// Fonctions de rendu pour Frame
// ============================================================================

/// Dessine une frame interpolée dans la zone donnée
pub fn render_chart(frame: &mut Frame, chart: &InterpolatedFrame, config: &ChartConfig, area: Rect) {
    frame.render_widget(ChartWidget::new(chart, config), area);
}

/// Affiche un message quand il n'y a rien à dessiner
pub fn render_placeholder(frame: &mut Frame, area: Rect, message: &str) {
    render_no_data(area, frame.buffer_mut(), message);
}

fn render_no_data(area: Rect, buf: &mut Buffer, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Graphique ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ];

    Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .render(area, buf);
}

// ============================================================================
// Tests unitaires
// ============================================================================
