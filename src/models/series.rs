// ============================================================================
// Structure : StockSeries
// ============================================================================
// Série temporelle validée d'un symbole boursier : points (timestamp, valeur)
//
// INVARIANTS (garantis par le constructeur, seul moyen de créer une série) :
// 1. Au moins un point
// 2. Timestamps strictement croissants (pas de doublon)
// 3. Toutes les valeurs sont finies (ni NaN, ni infini)
//
// CONCEPT RUST : Champs privés + constructeur faillible
// - Les champs ne sont pas "pub" : impossible de casser un invariant de l'extérieur
// - new() retourne Result : une série invalide n'existe jamais
// ============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::LoadError;

/// Un point de la série : instant + valeur
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockPoint {
    /// Instant du point (UTC)
    pub timestamp: DateTime<Utc>,

    /// Valeur (prix) au moment du point
    pub value: f64,
}

impl StockPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Série de points pour un symbole, triée par timestamp croissant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSeries {
    symbol: String,
    points: Vec<StockPoint>,
}

impl StockSeries {
    /// Crée une série en vérifiant tous les invariants
    ///
    /// CONCEPT RUST : Validation à la construction
    /// - Vérifie d'abord que la série n'est pas vide
    /// - Puis chaque valeur (finie) et chaque paire de timestamps (croissants)
    /// - Retourne la première erreur rencontrée
    pub fn new(symbol: impl Into<String>, points: Vec<StockPoint>) -> Result<Self, LoadError> {
        if points.is_empty() {
            return Err(LoadError::EmptySeries);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(LoadError::InvalidNumericValue {
                    field: "v",
                    index,
                    raw: point.value.to_string(),
                });
            }
        }

        // windows(2) : paires de points consécutifs (p[i-1], p[i])
        if let Some(offset) = points
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(LoadError::NonMonotonicTimestamps { index: offset + 1 });
        }

        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    /// Symbole (label) de la série
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Points de la série (jamais vide)
    pub fn points(&self) -> &[StockPoint] {
        &self.points
    }

    /// Nombre de points (toujours >= 1)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Toujours false pour une série valide, présent pour la cohérence avec len()
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Valeurs dans l'ordre des points
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Premier point (le plus ancien)
    pub fn first(&self) -> &StockPoint {
        // Invariant : au moins un point
        &self.points[0]
    }

    /// Dernier point (le plus récent)
    pub fn last(&self) -> &StockPoint {
        &self.points[self.points.len() - 1]
    }

    /// Intervalle de temps couvert : (premier timestamp, dernier timestamp)
    pub fn time_span(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.first().timestamp, self.last().timestamp)
    }

    /// Valeur minimale de la série
    ///
    /// Les valeurs sont finies, donc f64::min suffit (pas de partial_cmp)
    pub fn min_value(&self) -> f64 {
        self.points
            .iter()
            .fold(f64::INFINITY, |min, p| min.min(p.value))
    }

    /// Valeur maximale de la série
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .fold(f64::NEG_INFINITY, |max, p| max.max(p.value))
    }

    /// Variation en pourcentage entre le premier et le dernier point
    ///
    /// None si la première valeur vaut 0 (division impossible)
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.first().value;
        if first == 0.0 {
            return None;
        }
        Some(((self.last().value - first) / first) * 100.0)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[test]
    fn test_series_creation() {
        let series = StockSeries::new(
            "ACME",
            vec![StockPoint::new(at(0), 10.0), StockPoint::new(at(1), 12.0)],
        )
        .unwrap();

        assert_eq!(series.symbol(), "ACME");
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.values(), vec![10.0, 12.0]);
        assert_eq!(series.time_span(), (at(0), at(1)));
    }

    #[test]
    fn test_series_rejects_empty() {
        let result = StockSeries::new("ACME", Vec::new());
        assert_eq!(result, Err(LoadError::EmptySeries));
    }

    #[test]
    fn test_series_rejects_duplicate_timestamps() {
        let result = StockSeries::new(
            "ACME",
            vec![StockPoint::new(at(0), 1.0), StockPoint::new(at(0), 2.0)],
        );
        assert_eq!(result, Err(LoadError::NonMonotonicTimestamps { index: 1 }));
    }

    #[test]
    fn test_series_rejects_decreasing_timestamps() {
        let result = StockSeries::new(
            "ACME",
            vec![
                StockPoint::new(at(0), 1.0),
                StockPoint::new(at(5), 2.0),
                StockPoint::new(at(3), 3.0),
            ],
        );
        assert_eq!(result, Err(LoadError::NonMonotonicTimestamps { index: 2 }));
    }

    #[test]
    fn test_series_rejects_non_finite() {
        let result = StockSeries::new("ACME", vec![StockPoint::new(at(0), f64::NAN)]);
        assert!(matches!(
            result,
            Err(LoadError::InvalidNumericValue { field: "v", index: 0, .. })
        ));

        let result = StockSeries::new("ACME", vec![StockPoint::new(at(0), f64::INFINITY)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_series_statistics() {
        let series = StockSeries::new(
            "ACME",
            vec![
                StockPoint::new(at(0), 100.0),
                StockPoint::new(at(1), 90.0),
                StockPoint::new(at(2), 110.0),
            ],
        )
        .unwrap();

        assert_eq!(series.min_value(), 90.0);
        assert_eq!(series.max_value(), 110.0);
        assert!((series.change_percent().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_change_percent_zero_first_value() {
        let series = StockSeries::new(
            "ZERO",
            vec![StockPoint::new(at(0), 0.0), StockPoint::new(at(1), 5.0)],
        )
        .unwrap();
        assert_eq!(series.change_percent(), None);
    }
}
