// ============================================================================
// Configuration : ChartConfig
// ============================================================================
// Réglages du graphique et de l'animation
//
// SOURCES (de la plus faible à la plus forte) :
// 1. Valeurs par défaut (Default)
// 2. Fichier JSON optionnel (--config)
// 3. Options de la ligne de commande (--duration-ms, --easing)
//
// CONCEPT RUST : #[serde(default)]
// - Un champ absent du fichier prend la valeur de Default
// - Un fichier "{}" est donc une configuration valide
// ============================================================================

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animation::Easing;

/// Durée par défaut d'une transition
const DEFAULT_DURATION_MS: u64 = 600;

/// Intervalle par défaut entre deux frames (~60 fps)
const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Amplitude minimale de l'axe Y (évite un axe de hauteur nulle)
const DEFAULT_MIN_VISIBLE_RANGE: f64 = 1.0;

/// Marge ajoutée au-dessus et en dessous des valeurs (5%)
const DEFAULT_MARGIN_RATIO: f64 = 0.05;

/// Configuration du graphique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Durée d'une transition en millisecondes
    pub animation_duration_ms: u64,

    /// Courbe d'easing des transitions
    pub easing: Easing,

    /// Amplitude minimale de l'axe Y quand toutes les valeurs sont égales
    pub min_visible_range: f64,

    /// Marge relative autour des valeurs sur l'axe Y
    pub margin_ratio: f64,

    /// Intervalle entre deux frames en millisecondes
    pub frame_interval_ms: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
            min_visible_range: DEFAULT_MIN_VISIBLE_RANGE,
            margin_ratio: DEFAULT_MARGIN_RATIO,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl ChartConfig {
    /// Charge la configuration depuis un fichier JSON
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de la configuration {}", path.display()))?;

        let config: ChartConfig = serde_json::from_str(&content)
            .with_context(|| format!("Configuration invalide : {}", path.display()))?;

        Ok(config.sanitized())
    }

    /// Remplace les valeurs absurdes par les valeurs par défaut
    ///
    /// - min_visible_range doit être fini et > 0
    /// - margin_ratio est borné à [0, 1]
    /// - frame_interval_ms vaut au moins 1
    pub fn sanitized(mut self) -> Self {
        if !self.min_visible_range.is_finite() || self.min_visible_range <= 0.0 {
            warn!(value = self.min_visible_range, "Invalid min_visible_range, using default");
            self.min_visible_range = DEFAULT_MIN_VISIBLE_RANGE;
        }
        if !self.margin_ratio.is_finite() {
            warn!(value = self.margin_ratio, "Invalid margin_ratio, using default");
            self.margin_ratio = DEFAULT_MARGIN_RATIO;
        }
        self.margin_ratio = self.margin_ratio.clamp(0.0, 1.0);
        self.frame_interval_ms = self.frame_interval_ms.max(1);
        self
    }

    /// Durée d'une transition
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Intervalle entre deux frames (timeout du poll clavier)
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
