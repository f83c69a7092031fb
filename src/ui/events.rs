// ============================================================================
// Gestion des événements
// ============================================================================
// Lit le clavier avec un timeout égal à l'intervalle entre deux frames
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Error handling avec Result
// 3. matches! : pattern matching réduit à un bool
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Pas d'événement avant le timeout : on avance l'animation
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    timeout: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire qui attend au plus `timeout` par appel
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus une frame
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    /// - Les Release (Windows) sont ignorés pour éviter les doublons
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                // Resize, souris, Release : le prochain rendu suffit
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

// ============================================================================
// Helpers : Convertir Event en action
// ============================================================================

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter (deux pressions)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// 'n', '→' ou 'l' (vim) : snapshot suivant
pub fn is_next_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l'))
    )
}

/// 'p', '←' ou 'h' (vim) : snapshot précédent
pub fn is_previous_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h'))
    )
}

/// 'r' : relire le snapshot courant
pub fn is_reload_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('r') | KeyCode::Char('R')))
}

/// Espace ou Entrée : animer vers les valeurs en attente
pub fn is_animate_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char(' ') | KeyCode::Enter))
}

/// 'e' : courbe d'easing suivante
pub fn is_easing_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('e') | KeyCode::Char('E')))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_navigation_events() {
        assert!(is_next_event(&key(KeyCode::Right)));
        assert!(is_next_event(&key(KeyCode::Char('n'))));
        assert!(is_next_event(&key(KeyCode::Char('l'))));
        assert!(!is_next_event(&key(KeyCode::Left)));

        assert!(is_previous_event(&key(KeyCode::Left)));
        assert!(is_previous_event(&key(KeyCode::Char('p'))));
        assert!(is_previous_event(&key(KeyCode::Char('h'))));
        assert!(!is_previous_event(&Event::Tick));
    }

    #[test]
    fn test_action_events() {
        assert!(is_reload_event(&key(KeyCode::Char('r'))));
        assert!(is_animate_event(&key(KeyCode::Char(' '))));
        assert!(is_animate_event(&key(KeyCode::Enter)));
        assert!(is_easing_event(&key(KeyCode::Char('e'))));
        assert!(!is_animate_event(&key(KeyCode::Char('e'))));
    }
}
