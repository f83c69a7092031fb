// ============================================================================
// Source de snapshots : lecture des fichiers JSON
// ============================================================================
// Collaborateur externe du graphique : lit un fichier, parse le JSON et
// retourne le dictionnaire brut. La validation reste le travail de load().
//
// CONCEPTS RUST :
// 1. async/await : lecture non-bloquante avec tokio::fs
// 2. anyhow::Context : messages d'erreur avec le chemin du fichier
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::models::RawInput;

/// Lit un snapshot JSON sur disque et retourne son dictionnaire racine
///
/// # Erreurs
/// - fichier illisible
/// - JSON invalide
/// - racine qui n'est pas un objet JSON
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn read_snapshot(path: &Path) -> Result<RawInput> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Échec de la lecture de {}", path.display()))?;

    debug!(bytes = content.len(), "Snapshot file read");

    parse_snapshot(&content)
        .with_context(|| format!("Snapshot invalide : {}", path.display()))
}

/// Parse le contenu d'un snapshot (séparé pour être testable sans fichier)
pub fn parse_snapshot(content: &str) -> Result<RawInput> {
    let value: Value = serde_json::from_str(content).context("Échec du parsing JSON")?;

    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "La racine du snapshot doit être un objet JSON, trouvé : {}",
            json_kind(&other)
        ),
    }
}

/// Nom lisible du type JSON (pour les messages d'erreur)
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "booléen",
        Value::Number(_) => "nombre",
        Value::String(_) => "chaîne",
        Value::Array(_) => "tableau",
        Value::Object(_) => "objet",
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot_object() {
        let raw = parse_snapshot(r#"{"symbol":"ACME","points":[]}"#).unwrap();
        assert_eq!(raw.get("symbol").and_then(Value::as_str), Some("ACME"));
    }

    #[test]
    fn test_parse_snapshot_rejects_non_object() {
        let err = parse_snapshot("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("tableau"));

        assert!(parse_snapshot("{not json").is_err());
    }

    // CONCEPT RUST : #[tokio::test]
    // - Runtime tokio pour le test, permet .await
    #[tokio::test]
    async fn test_read_snapshot_from_file() {
        let path = std::env::temp_dir().join(format!(
            "articulate-chart-test-{}.json",
            std::process::id()
        ));
        tokio::fs::write(&path, r#"{"symbol":"ACME","points":[{"t":0,"v":10}]}"#)
            .await
            .unwrap();

        let raw = read_snapshot(&path).await.unwrap();
        assert!(raw.contains_key("points"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_snapshot_missing_file() {
        let path = std::env::temp_dir().join("articulate-chart-does-not-exist.json");
        let err = read_snapshot(&path).await.unwrap_err();
        assert!(err.to_string().contains("articulate-chart-does-not-exist"));
    }
}
