// ============================================================================
// Structure : ChartView
// ============================================================================
// La vue graphique et son contrat public à deux opérations :
//
//   configure(&RawInput) -> bool      charge un jeu de données
//   animate_to_stock_values()         anime vers les dernières données chargées
//
// FLUX :
//   configure ──load()──▶ StockSeries ──▶ pending
//   animate_to_stock_values ──pending──▶ AnimationController::begin_transition
//   hôte, à chaque frame ──▶ tick(now) ──▶ InterpolatedFrame ──▶ ChartWidget
//
// GARANTIES :
// - Un configure() qui échoue ne modifie rien (ni pending, ni affichage)
// - Le premier configure() réussi s'affiche directement (rien à animer depuis)
// - animate_to_stock_values() sans données en attente ne fait rien
// ============================================================================

use std::time::Instant;

use ratatui::{layout::Rect, Frame};
use tracing::{debug, info, warn};

use crate::animation::{AnimationController, Easing, InterpolatedFrame};
use crate::config::ChartConfig;
use crate::error::LoadError;
use crate::loader;
use crate::models::{RawInput, StockSeries};
use crate::ui::chart;

/// Vue graphique animée d'une série boursière
#[derive(Debug, Clone)]
pub struct ChartView {
    config: ChartConfig,
    controller: AnimationController,

    /// Dernière série validée, pas encore animée
    pending: Option<StockSeries>,

    /// Raison du dernier refus de configure() (diagnostic)
    last_error: Option<LoadError>,
}

impl ChartView {
    pub fn new(config: ChartConfig) -> Self {
        let controller = AnimationController::new(config.animation_duration(), config.easing);
        Self {
            config,
            controller,
            pending: None,
            last_error: None,
        }
    }

    /// Charge un jeu de données depuis un dictionnaire JSON déjà parsé
    ///
    /// Retourne false si les données ne peuvent pas être chargées ; dans ce
    /// cas l'état de la vue est inchangé.
    pub fn configure(&mut self, data: &RawInput) -> bool {
        match loader::load(data) {
            Ok(series) => {
                info!(
                    symbol = %series.symbol(),
                    points = series.len(),
                    "Chart configured with new stock values"
                );
                self.last_error = None;

                if self.controller.has_content() {
                    self.pending = Some(series);
                } else {
                    // Rien d'affiché : pas de transition possible, on affiche
                    self.controller.jump_to(series);
                    self.pending = None;
                }
                true
            }
            Err(err) => {
                warn!(error = %err, "Rejected stock data");
                self.last_error = Some(err);
                false
            }
        }
    }

    /// Anime le graphique vers les dernières valeurs chargées
    pub fn animate_to_stock_values(&mut self) {
        self.animate_to_stock_values_at(Instant::now());
    }

    /// Variante avec horloge explicite (hôtes et tests)
    pub fn animate_to_stock_values_at(&mut self, now: Instant) {
        match self.pending.take() {
            Some(target) => {
                debug!(symbol = %target.symbol(), "Animating to stock values");
                self.controller.begin_transition(target, now);
            }
            None => debug!("No pending stock values, nothing to animate"),
        }
    }

    /// Avance l'animation et retourne la frame à dessiner
    pub fn tick(&mut self, now: Instant) -> Option<InterpolatedFrame> {
        self.controller.tick(now)
    }

    /// Avance l'animation et dessine la vue dans la zone donnée
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, now: Instant) {
        match self.tick(now) {
            Some(current) => chart::render_chart(frame, &current, &self.config, area),
            None => chart::render_placeholder(frame, area, "Aucune donnée chargée"),
        }
    }

    /// true pendant une transition
    pub fn is_animating(&self) -> bool {
        !self.controller.is_complete()
    }

    /// Série au repos (None pendant une transition)
    pub fn displayed_series(&self) -> Option<&StockSeries> {
        self.controller.displayed()
    }

    /// Série chargée mais pas encore animée
    pub fn pending_series(&self) -> Option<&StockSeries> {
        self.pending.as_ref()
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    /// Change la courbe d'easing (transition en cours comprise, sans saut)
    pub fn set_easing(&mut self, easing: Easing, now: Instant) {
        self.config.easing = easing;
        self.controller.set_easing(easing, now);
    }
}

impl Default for ChartView {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
