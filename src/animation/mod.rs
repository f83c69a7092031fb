// ============================================================================
// Module : animation
// ============================================================================
// Transitions animées entre deux séries
// - easing : courbes de progression
// - interpolate : rééchantillonnage et interpolation linéaire
// - controller : state machine Idle / Transitioning, horloge, frames
// ============================================================================

pub mod controller;
pub mod easing;
pub mod interpolate;

pub use controller::{AnimationController, AnimationState, InterpolatedFrame};
pub use easing::Easing;
