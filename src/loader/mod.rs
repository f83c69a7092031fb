// ============================================================================
// Module : loader
// ============================================================================
// Transforme des données externes en StockSeries
// - validator : dictionnaire brut → série validée (cœur du graphique)
// - source : lecture des snapshots JSON sur disque (utilisé par le binaire)
// ============================================================================

pub mod source;
pub mod validator;

// Re-export des fonctions principales
pub use source::read_snapshot;
pub use validator::load;
