// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données du graphique
//
// - RawInput : dictionnaire JSON non typé, tel que reçu par configure()
// - StockSeries : série validée, seule forme manipulée par l'animation
// ============================================================================

pub mod series; // Déclaration du module series (fichier series.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use articulate_chart::models::series::StockSeries;
// On peut faire : use articulate_chart::models::StockSeries;
pub use series::{StockPoint, StockSeries};

/// Dictionnaire non typé (JSON déjà parsé) passé à configure()
///
/// CONCEPT RUST : Type alias
/// - Aucun nouveau type, juste un nom plus parlant
/// - Transient : emprunté (&RawInput) le temps de la validation, jamais stocké
pub type RawInput = serde_json::Map<String, serde_json::Value>;
