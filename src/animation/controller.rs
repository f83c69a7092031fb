// ============================================================================
// Contrôleur d'animation
// ============================================================================
// Possède la série affichée et la transition en cours, et produit à chaque
// frame les valeurs interpolées à dessiner.
//
// STATE MACHINE :
//
//   Idle ──begin_transition──▶ Transitioning ──progress = 1──▶ Idle
//                                   │    ▲
//                                   └────┘ begin_transition (re-target)
//
// - Idle : pas de cible, `displayed` contient la série au repos
// - Transitioning : `state` contient source, cible, horloge
// - Re-target : les valeurs interpolées courantes deviennent la nouvelle
//   source, la progression repart de 0 → aucun saut visuel
//
// CONCEPT : Horloge externe
// - Le contrôleur ne lance ni thread ni timer
// - L'hôte appelle tick(now) à chaque frame avec l'instant courant
// - tick() est idempotent pour un même `now` et ne recule jamais
// ============================================================================

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::animation::easing::Easing;
use crate::animation::interpolate::{lerp, resample};
use crate::models::{StockPoint, StockSeries};

// ============================================================================
// InterpolatedFrame
// ============================================================================

/// Géométrie à dessiner pour une frame
///
/// Les valeurs sont dans l'ordre de rendu ; le point i est placé à la
/// position normalisée i / (len - 1) sur l'axe X.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedFrame {
    /// Symbole affiché (celui de la cible pendant une transition)
    pub symbol: String,

    /// Valeurs interpolées
    pub values: Vec<f64>,

    /// Progression après easing, dans [0, 1] (1.0 au repos)
    pub progress: f64,

    /// Premier et dernier timestamp de la série affichée ou visée
    pub time_span: (DateTime<Utc>, DateTime<Utc>),

    /// true tant qu'une transition est en cours
    pub animating: bool,
}

impl InterpolatedFrame {
    /// Frame statique d'une série au repos
    pub fn settled(series: &StockSeries) -> Self {
        Self {
            symbol: series.symbol().to_string(),
            values: series.values(),
            progress: 1.0,
            time_span: series.time_span(),
            animating: false,
        }
    }

    /// Dernière valeur de la frame (None si la frame est vide)
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Variation en % entre la première et la dernière valeur
    pub fn change_percent(&self) -> Option<f64> {
        let first = *self.values.first()?;
        let last = *self.values.last()?;
        if first == 0.0 || !first.is_finite() || !last.is_finite() {
            return None;
        }
        Some(((last - first) / first) * 100.0)
    }
}

// ============================================================================
// AnimationState
// ============================================================================

/// Transition en cours : n'existe que pendant l'animation
#[derive(Debug, Clone)]
pub struct AnimationState {
    source: StockSeries,
    target: StockSeries,
    /// Progression brute (avant easing) dans [0, 1]
    progress: f64,
    start_time: Instant,
    duration: Duration,
}

impl AnimationState {
    fn new(source: StockSeries, target: StockSeries, start_time: Instant, duration: Duration) -> Self {
        Self {
            source,
            target,
            progress: 0.0,
            start_time,
            duration,
        }
    }

    pub fn source(&self) -> &StockSeries {
        &self.source
    }

    pub fn target(&self) -> &StockSeries {
        &self.target
    }

    /// Progression brute (linéaire en temps)
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Avance l'horloge jusqu'à `now`
    ///
    /// - max() : un `now` plus ancien ne fait jamais reculer la progression
    /// - saturating_duration_since : pas de panic si `now` < start_time
    fn advance(&mut self, now: Instant) {
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(self.start_time);
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.progress = self.progress.max(raw.min(1.0));
    }

    fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Nombre de points pendant la transition : max(source, cible)
    fn grid_len(&self) -> usize {
        self.source.len().max(self.target.len())
    }

    /// Valeurs interpolées pour une progression après easing
    fn values_at(&self, eased: f64) -> Vec<f64> {
        let count = self.grid_len();
        let from = resample(&self.source.values(), count);
        let to = resample(&self.target.values(), count);

        from.iter()
            .zip(to.iter())
            .map(|(&a, &b)| lerp(a, b, eased))
            .collect()
    }

    fn frame(&self, easing: Easing) -> InterpolatedFrame {
        let eased = easing.apply(self.progress);
        InterpolatedFrame {
            symbol: self.target.symbol().to_string(),
            values: self.values_at(eased),
            progress: eased,
            time_span: self.target.time_span(),
            animating: true,
        }
    }

    /// Fige l'état courant en une série (nouvelle source d'un re-target)
    ///
    /// Les timestamps viennent de la plus longue des deux séries : elle a
    /// exactement autant de points que la grille et ses timestamps sont
    /// strictement croissants.
    fn snapshot(&self, easing: Easing) -> StockSeries {
        let eased = easing.apply(self.progress);
        if eased <= 0.0 {
            return self.source.clone();
        }

        let timeline = if self.source.len() >= self.target.len() {
            &self.source
        } else {
            &self.target
        };

        let points = timeline
            .points()
            .iter()
            .zip(self.values_at(eased))
            .map(|(point, value)| StockPoint::new(point.timestamp, value))
            .collect();

        StockSeries::new(self.target.symbol(), points).unwrap_or_else(|err| {
            warn!(error = %err, "Interpolated snapshot rejected, keeping previous source");
            self.source.clone()
        })
    }
}

// ============================================================================
// AnimationController
// ============================================================================

/// Pilote les transitions entre séries
#[derive(Debug, Clone)]
pub struct AnimationController {
    /// Série au repos (None pendant une transition ou avant tout chargement)
    displayed: Option<StockSeries>,

    /// Transition en cours
    state: Option<AnimationState>,

    /// Durée appliquée aux prochaines transitions
    duration: Duration,

    /// Courbe appliquée à la progression
    easing: Easing,
}

impl AnimationController {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            displayed: None,
            state: None,
            duration,
            easing,
        }
    }

    /// Démarre (ou redirige) une transition vers `target`
    ///
    /// - Rien d'affiché : la cible est affichée directement
    /// - Au repos : transition depuis la série affichée
    /// - En cours : re-target depuis les valeurs interpolées courantes
    pub fn begin_transition(&mut self, target: StockSeries, now: Instant) {
        if let Some(current) = self.state.take() {
            debug!(
                progress = current.progress,
                symbol = %target.symbol(),
                "Re-targeting transition in flight"
            );
            let source = current.snapshot(self.easing);
            self.state = Some(AnimationState::new(source, target, now, self.duration));
        } else if let Some(source) = self.displayed.take() {
            debug!(
                from = source.len(),
                to = target.len(),
                duration_ms = self.duration.as_millis() as u64,
                "Starting transition"
            );
            self.state = Some(AnimationState::new(source, target, now, self.duration));
        } else {
            debug!(symbol = %target.symbol(), "Nothing displayed yet, showing target directly");
            self.displayed = Some(target);
        }
    }

    /// Affiche `series` immédiatement, en annulant toute transition
    pub fn jump_to(&mut self, series: StockSeries) {
        self.state = None;
        self.displayed = Some(series);
    }

    /// Avance l'horloge et retourne la frame à dessiner
    ///
    /// None seulement si aucune série n'a jamais été affichée.
    pub fn tick(&mut self, now: Instant) -> Option<InterpolatedFrame> {
        let finished = match self.state.as_mut() {
            Some(state) => {
                state.advance(now);
                state.is_finished()
            }
            None => false,
        };

        if finished {
            if let Some(state) = self.state.take() {
                debug!(symbol = %state.target.symbol(), "Transition complete");
                self.displayed = Some(state.target);
            }
        }

        match &self.state {
            Some(state) => Some(state.frame(self.easing)),
            None => self.displayed.as_ref().map(InterpolatedFrame::settled),
        }
    }

    /// true si aucune transition n'est en cours
    pub fn is_complete(&self) -> bool {
        self.state.is_none()
    }

    /// Série au repos (None pendant une transition)
    pub fn displayed(&self) -> Option<&StockSeries> {
        self.displayed.as_ref()
    }

    /// Transition en cours
    pub fn state(&self) -> Option<&AnimationState> {
        self.state.as_ref()
    }

    /// true si une série est affichée ou en cours d'animation
    pub fn has_content(&self) -> bool {
        self.displayed.is_some() || self.state.is_some()
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Change la courbe d'easing
    ///
    /// Pendant une transition, les valeurs courantes (ancienne courbe)
    /// deviennent la nouvelle source et l'horloge repart de `now`, comme
    /// pour un re-target : la frame suivante est identique à la précédente.
    pub fn set_easing(&mut self, easing: Easing, now: Instant) {
        if let Some(current) = self.state.take() {
            debug!(
                progress = current.progress,
                from = %self.easing,
                to = %easing,
                "Rebasing transition on easing change"
            );
            let source = current.snapshot(self.easing);
            self.state = Some(AnimationState::new(source, current.target, now, self.duration));
        }
        self.easing = easing;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
