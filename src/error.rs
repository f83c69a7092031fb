// ============================================================================
// Erreurs de chargement
// ============================================================================
// Toutes les raisons pour lesquelles un dictionnaire de données est refusé.
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère Display à partir des champs du variant
// - Le validateur distingue chaque cas, la vue les réduit à un bool
// ============================================================================

use thiserror::Error;

/// Erreur de validation d'un dictionnaire de données boursières
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Clé obligatoire absente (au niveau racine si `index` vaut None)
    #[error("missing field '{field}'{}", at_index(.index))]
    MissingField {
        field: &'static str,
        index: Option<usize>,
    },

    /// Clé présente mais avec le mauvais type JSON
    #[error("field '{field}' must be {expected}{}", at_index(.index))]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        index: Option<usize>,
    },

    /// Timestamp ou valeur non numérique, non parsable ou non fini
    #[error("field '{field}' at point {index} is not a valid number: {raw}")]
    InvalidNumericValue {
        field: &'static str,
        index: usize,
        raw: String,
    },

    /// Aucun point dans la série
    #[error("series contains no points")]
    EmptySeries,

    /// Le point `index` n'est pas strictement après le précédent
    #[error("timestamps must be strictly increasing (point {index})")]
    NonMonotonicTimestamps { index: usize },
}

/// Suffixe " at point N" pour les messages d'erreur
fn at_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at point {}", i),
        None => String::new(),
    }
}
