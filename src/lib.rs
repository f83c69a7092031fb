// ============================================================================
// Articulate Chart - Library
// ============================================================================
// Graphique boursier animé : chargement, validation, transitions, rendu
// ============================================================================

pub mod animation; // Transitions animées entre séries
pub mod app;       // État de l'application de démonstration
pub mod config;    // Réglages du graphique
pub mod error;     // Erreurs de validation
pub mod loader;    // Lecture et validation des données brutes
pub mod models;    // Structures de données
pub mod ui;        // Interface utilisateur
pub mod view;      // ChartView : configure / animate_to_stock_values

pub use config::ChartConfig;
pub use error::LoadError;
pub use models::{RawInput, StockPoint, StockSeries};
pub use view::ChartView;
