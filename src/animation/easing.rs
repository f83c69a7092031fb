// ============================================================================
// Easing : courbes de progression
// ============================================================================
// Transforme la progression linéaire du temps (0 → 1) en progression visuelle
//
// Toutes les courbes sont monotones croissantes et vérifient f(0) = 0, f(1) = 1,
// ce qui garantit qu'une animation démarre exactement sur la source et finit
// exactement sur la cible.
//
//   Linear     : t
//   EaseIn     : t²              (départ lent)
//   EaseOut    : 1 - (1 - t)²    (arrivée lente)
//   EaseInOut  : t² (3 - 2t)     (smoothstep, départ et arrivée lents)
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Courbe d'easing appliquée à la progression d'une transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Progression constante
    Linear,
    /// Accélération progressive
    EaseIn,
    /// Décélération progressive
    EaseOut,
    /// Accélération puis décélération (par défaut)
    #[default]
    EaseInOut,
}

impl Easing {
    /// Applique la courbe à une progression brute
    ///
    /// L'entrée est bornée à [0, 1] ; NaN est traité comme 0.
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Nom utilisé dans la configuration et sur la ligne de commande
    pub fn label(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease_in",
            Easing::EaseOut => "ease_out",
            Easing::EaseInOut => "ease_in_out",
        }
    }

    /// Retourne toutes les courbes disponibles
    pub fn all() -> Vec<Easing> {
        vec![
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ]
    }

    /// Courbe suivante (cycle)
    pub fn next(&self) -> Easing {
        match self {
            Easing::Linear => Easing::EaseIn,
            Easing::EaseIn => Easing::EaseOut,
            Easing::EaseOut => Easing::EaseInOut,
            Easing::EaseInOut => Easing::Linear, // Boucle
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsing depuis la ligne de commande : "ease_in_out" ou "ease-in-out"
impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Easing::all()
            .into_iter()
            .find(|e| e.label() == normalized)
            .ok_or_else(|| {
                format!(
                    "easing inconnu '{}', attendu : linear, ease_in, ease_out, ease_in_out",
                    s
                )
            })
    }
}
