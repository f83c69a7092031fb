// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI de démonstration
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède la ChartView, elle ne la réimplémente pas
//
// PATTERN : "Application State"
// - Le rendu lit depuis App (&App)
// - Les événements clavier et les résultats du worker passent par ses méthodes
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::animation::InterpolatedFrame;
use crate::config::ChartConfig;
use crate::models::RawInput;
use crate::view::ChartView;

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' arme, deuxième quitte
    pub confirm_quit: bool,

    /// Fichiers JSON parcourus avec n / p
    snapshots: Vec<PathBuf>,

    /// Index du snapshot courant
    current: usize,

    /// Un chargement est en cours dans le worker
    pub is_loading: bool,

    /// Message affiché pendant le chargement
    pub loading_message: Option<String>,

    /// Dernier message d'état (succès ou erreur) pour le footer
    pub status: Option<Status>,

    /// La vue graphique
    view: ChartView,

    /// Dernière frame calculée par tick()
    frame: Option<InterpolatedFrame>,
}

/// Message d'état affiché dans le footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl App {
    pub fn new(snapshots: Vec<PathBuf>, config: ChartConfig) -> Self {
        Self {
            running: true,
            confirm_quit: false,
            snapshots,
            current: 0,
            is_loading: false,
            loading_message: None,
            status: None,
            view: ChartView::new(config),
            frame: None,
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Avance l'animation et garde la frame pour le prochain rendu.
    pub fn tick(&mut self, now: Instant) {
        self.frame = self.view.tick(now);
    }

    // ========================================================================
    // Navigation entre snapshots
    // ========================================================================

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_snapshot(&self) -> Option<&Path> {
        self.snapshots.get(self.current).map(PathBuf::as_path)
    }

    /// Passe au snapshot suivant (cyclique) et retourne son index
    ///
    /// CONCEPT RUST : modulo sur usize
    /// - (i + 1) % len boucle sur la liste
    /// - None si la liste est vide (pas de division par zéro)
    pub fn next_snapshot(&mut self) -> Option<usize> {
        if self.snapshots.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.snapshots.len();
        Some(self.current)
    }

    /// Passe au snapshot précédent (cyclique) et retourne son index
    pub fn previous_snapshot(&mut self) -> Option<usize> {
        if self.snapshots.is_empty() {
            return None;
        }
        let len = self.snapshots.len();
        self.current = (self.current + len - 1) % len;
        Some(self.current)
    }

    // ========================================================================
    // Chargement
    // ========================================================================

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    /// Applique un snapshot lu par le worker
    ///
    /// configure() puis animate_to_stock_values() : chaque snapshot valide
    /// déclenche une transition. Les résultats d'un ancien index sont ignorés.
    /// Retourne true si le snapshot a été accepté.
    pub fn apply_loaded(&mut self, index: usize, data: &RawInput, now: Instant) -> bool {
        if index != self.current {
            debug!(index, current = self.current, "Ignoring stale snapshot");
            return false;
        }
        self.stop_loading();

        if self.view.configure(data) {
            self.view.animate_to_stock_values_at(now);
            let symbol = self
                .view
                .controller()
                .state()
                .map(|state| state.target().symbol().to_string())
                .or_else(|| self.view.displayed_series().map(|s| s.symbol().to_string()))
                .unwrap_or_default();
            info!(index, symbol = %symbol, "Snapshot applied");
            self.status = Some(Status::Info(format!("Snapshot {} chargé", index + 1)));
            true
        } else {
            let reason = self
                .view
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "données invalides".to_string());
            self.status = Some(Status::Error(format!("Snapshot {} rejeté : {}", index + 1, reason)));
            false
        }
    }

    /// Enregistre l'échec de lecture d'un snapshot
    pub fn apply_failed(&mut self, index: usize, error: String) {
        if index != self.current {
            debug!(index, current = self.current, "Ignoring stale load error");
            return;
        }
        self.stop_loading();
        warn!(index, error = %error, "Snapshot could not be read");
        self.status = Some(Status::Error(error));
    }

    // ========================================================================
    // Graphique
    // ========================================================================

    /// Relance l'animation vers les valeurs en attente (touche espace)
    pub fn animate(&mut self, now: Instant) {
        self.view.animate_to_stock_values_at(now);
    }

    /// Passe à la courbe d'easing suivante
    pub fn cycle_easing(&mut self, now: Instant) {
        let easing = self.view.config().easing.next();
        self.view.set_easing(easing, now);
        info!(easing = %easing, "Easing changed");
        self.status = Some(Status::Info(format!("Easing : {}", easing.label())));
    }

    pub fn view(&self) -> &ChartView {
        &self.view
    }

    pub fn current_frame(&self) -> Option<&InterpolatedFrame> {
        self.frame.as_ref()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
