// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod chart;  // Widget du graphique animé
pub mod events; // Gestion des événements clavier
pub mod screen; // Rendu de l'écran principal

// Re-exports pour simplifier les imports
pub use chart::ChartWidget;
pub use events::{Event, EventHandler};
pub use screen::render;
