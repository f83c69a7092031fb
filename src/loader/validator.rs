// ============================================================================
// Validateur : RawInput → StockSeries
// ============================================================================
// Convertit un dictionnaire JSON non typé en série validée, ou le rejette
//
// FORMAT ATTENDU :
// {
//   "symbol": "ACME",                 (optionnel, sinon "name", sinon "")
//   "points": [
//     { "t": 0,   "v": 10 },          t : secondes Unix (entier ou flottant)
//     { "t": "1", "v": "12.5" },      nombres sous forme de chaîne acceptés
//     { "t": "2024-01-02T00:00:00Z", "v": 11 }   ou RFC 3339
//   ]
// }
//
// RÈGLES :
// - Aucun tri, aucune fusion : des timestamps dupliqués ou décroissants
//   sont une erreur (NonMonotonicTimestamps)
// - Aucune écriture partielle : on construit tout, puis on retourne
// ============================================================================

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::models::{RawInput, StockPoint, StockSeries};

/// Clé du tableau de points
const POINTS_KEY: &str = "points";
/// Clé du label principal
const SYMBOL_KEY: &str = "symbol";
/// Label de repli si "symbol" est absent
const NAME_KEY: &str = "name";
/// Clé du timestamp dans un point
const TIME_KEY: &str = "t";
/// Clé de la valeur dans un point
const VALUE_KEY: &str = "v";

/// Valide un dictionnaire et construit la série correspondante
///
/// CONCEPT RUST : Result + ?
/// - Chaque étape peut échouer avec un LoadError précis
/// - ? remonte la première erreur, rien n'est retourné à moitié construit
pub fn load(raw: &RawInput) -> Result<StockSeries, LoadError> {
    let points = match raw.get(POINTS_KEY) {
        Some(Value::Array(points)) => points,
        Some(_) => {
            return Err(LoadError::InvalidField {
                field: POINTS_KEY,
                expected: "an array",
                index: None,
            })
        }
        None => {
            return Err(LoadError::MissingField {
                field: POINTS_KEY,
                index: None,
            })
        }
    };

    let symbol = read_symbol(raw)?;

    if points.is_empty() {
        return Err(LoadError::EmptySeries);
    }

    let parsed = points
        .iter()
        .enumerate()
        .map(|(index, point)| read_point(index, point))
        .collect::<Result<Vec<_>, _>>()?;

    // Le constructeur vérifie l'ordre strict des timestamps
    let series = StockSeries::new(symbol, parsed)?;

    debug!(
        symbol = %series.symbol(),
        points = series.len(),
        "Stock series validated"
    );
    Ok(series)
}

/// Lit le label : "symbol", puis "name", puis chaîne vide
fn read_symbol(raw: &RawInput) -> Result<String, LoadError> {
    for key in [SYMBOL_KEY, NAME_KEY] {
        match raw.get(key) {
            Some(Value::String(s)) => return Ok(s.trim().to_string()),
            Some(_) => {
                return Err(LoadError::InvalidField {
                    field: key_name(key),
                    expected: "a string",
                    index: None,
                })
            }
            None => continue,
        }
    }
    Ok(String::new())
}

/// Convertit &str en &'static str pour les clés connues
fn key_name(key: &str) -> &'static str {
    if key == SYMBOL_KEY {
        SYMBOL_KEY
    } else {
        NAME_KEY
    }
}

/// Lit un point { "t": ..., "v": ... }
fn read_point(index: usize, point: &Value) -> Result<StockPoint, LoadError> {
    let object = point.as_object().ok_or(LoadError::InvalidField {
        field: "point",
        expected: "an object",
        index: Some(index),
    })?;

    let raw_time = object.get(TIME_KEY).ok_or(LoadError::MissingField {
        field: TIME_KEY,
        index: Some(index),
    })?;
    let raw_value = object.get(VALUE_KEY).ok_or(LoadError::MissingField {
        field: VALUE_KEY,
        index: Some(index),
    })?;

    let timestamp = parse_timestamp(raw_time).ok_or_else(|| LoadError::InvalidNumericValue {
        field: TIME_KEY,
        index,
        raw: raw_time.to_string(),
    })?;

    let value = parse_value(raw_value).ok_or_else(|| LoadError::InvalidNumericValue {
        field: VALUE_KEY,
        index,
        raw: raw_value.to_string(),
    })?;

    Ok(StockPoint::new(timestamp, value))
}

/// Normalise un timestamp JSON en DateTime<Utc>
///
/// Formes acceptées :
/// - entier : secondes Unix
/// - flottant : secondes Unix, partie fractionnaire conservée à la milliseconde
/// - chaîne : l'une des deux formes ci-dessus, ou RFC 3339
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(seconds) => DateTime::from_timestamp(seconds, 0),
            None => n.as_f64().and_then(seconds_to_datetime),
        },
        Value::String(s) => {
            let s = s.trim();
            if let Ok(seconds) = s.parse::<i64>() {
                return DateTime::from_timestamp(seconds, 0);
            }
            if let Ok(seconds) = s.parse::<f64>() {
                return seconds_to_datetime(seconds);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

/// Secondes flottantes → DateTime (None si non fini ou hors bornes)
fn seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Normalise une valeur JSON en f64 fini
pub fn parse_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw(value: Value) -> RawInput {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_load_valid_series() {
        let input = raw(json!({
            "symbol": "ACME",
            "points": [{"t": 0, "v": 10}, {"t": 1, "v": 12}]
        }));

        let series = load(&input).unwrap();
        assert_eq!(series.symbol(), "ACME");
        assert_eq!(series.values(), vec![10.0, 12.0]);
        assert_eq!(series.first().timestamp, Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_load_missing_points() {
        let input = raw(json!({"symbol": "ACME"}));
        assert_eq!(
            load(&input),
            Err(LoadError::MissingField {
                field: "points",
                index: None
            })
        );
    }

    #[test]
    fn test_load_points_not_an_array() {
        let input = raw(json!({"points": {"t": 0, "v": 1}}));
        assert!(matches!(
            load(&input),
            Err(LoadError::InvalidField { field: "points", .. })
        ));
    }

    #[test]
    fn test_load_empty_series() {
        let input = raw(json!({"points": []}));
        assert_eq!(load(&input), Err(LoadError::EmptySeries));
    }

    #[test]
    fn test_load_duplicate_timestamps() {
        let input = raw(json!({"points": [{"t": 0, "v": 1}, {"t": 0, "v": 2}]}));
        assert_eq!(
            load(&input),
            Err(LoadError::NonMonotonicTimestamps { index: 1 })
        );
    }

    #[test]
    fn test_load_unsorted_points_are_rejected_not_sorted() {
        let input = raw(json!({"points": [{"t": 5, "v": 1}, {"t": 2, "v": 2}]}));
        assert_eq!(
            load(&input),
            Err(LoadError::NonMonotonicTimestamps { index: 1 })
        );
    }

    #[test]
    fn test_load_missing_point_fields() {
        let input = raw(json!({"points": [{"t": 0, "v": 1}, {"t": 1}]}));
        assert_eq!(
            load(&input),
            Err(LoadError::MissingField {
                field: "v",
                index: Some(1)
            })
        );

        let input = raw(json!({"points": [{"v": 1}]}));
        assert_eq!(
            load(&input),
            Err(LoadError::MissingField {
                field: "t",
                index: Some(0)
            })
        );
    }

    #[test]
    fn test_load_non_numeric_values() {
        let input = raw(json!({"points": [{"t": 0, "v": "abc"}]}));
        assert!(matches!(
            load(&input),
            Err(LoadError::InvalidNumericValue { field: "v", index: 0, .. })
        ));

        let input = raw(json!({"points": [{"t": "yesterday", "v": 1}]}));
        assert!(matches!(
            load(&input),
            Err(LoadError::InvalidNumericValue { field: "t", index: 0, .. })
        ));

        let input = raw(json!({"points": [{"t": 0, "v": null}]}));
        assert!(matches!(
            load(&input),
            Err(LoadError::InvalidNumericValue { field: "v", .. })
        ));

        let input = raw(json!({"points": [{"t": 0, "v": "NaN"}]}));
        assert!(matches!(
            load(&input),
            Err(LoadError::InvalidNumericValue { field: "v", .. })
        ));
    }

    #[test]
    fn test_load_point_not_an_object() {
        let input = raw(json!({"points": [[0, 1]]}));
        assert_eq!(
            load(&input),
            Err(LoadError::InvalidField {
                field: "point",
                expected: "an object",
                index: Some(0)
            })
        );
    }

    #[test]
    fn test_load_symbol_fallbacks() {
        let input = raw(json!({"name": "Acme Corp", "points": [{"t": 0, "v": 1}]}));
        assert_eq!(load(&input).unwrap().symbol(), "Acme Corp");

        let input = raw(json!({"points": [{"t": 0, "v": 1}]}));
        assert_eq!(load(&input).unwrap().symbol(), "");

        let input = raw(json!({"symbol": 42, "points": [{"t": 0, "v": 1}]}));
        assert!(matches!(
            load(&input),
            Err(LoadError::InvalidField { field: "symbol", .. })
        ));
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let epoch_plus_60 = Utc.timestamp_opt(60, 0).unwrap();

        assert_eq!(parse_timestamp(&json!(60)), Some(epoch_plus_60));
        assert_eq!(parse_timestamp(&json!("60")), Some(epoch_plus_60));
        assert_eq!(parse_timestamp(&json!(60.0)), Some(epoch_plus_60));
        assert_eq!(
            parse_timestamp(&json!("1970-01-01T00:01:00Z")),
            Some(epoch_plus_60)
        );

        let half = parse_timestamp(&json!(0.5)).unwrap();
        assert_eq!(half.timestamp_millis(), 500);

        assert_eq!(parse_timestamp(&json!(true)), None);
        assert_eq!(parse_timestamp(&json!("inf")), None);
    }

    #[test]
    fn test_parse_value_forms() {
        assert_eq!(parse_value(&json!(12.5)), Some(12.5));
        assert_eq!(parse_value(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(parse_value(&json!("-inf")), None);
        assert_eq!(parse_value(&json!([1])), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn points_strategy() -> impl Strategy<Value = (i64, Vec<(i64, f64)>)> {
            (
                0i64..2_000_000_000,
                prop::collection::vec((1i64..100_000, -1.0e9f64..1.0e9f64), 1..40),
            )
        }

        fn build(start: i64, steps: &[(i64, f64)]) -> RawInput {
            let mut t = start;
            let points: Vec<Value> = steps
                .iter()
                .map(|&(gap, v)| {
                    t += gap;
                    json!({"t": t, "v": v})
                })
                .collect();
            raw(json!({"symbol": "PROP", "points": points}))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_loaded_series_keeps_invariants((start, steps) in points_strategy()) {
                let series = load(&build(start, &steps)).unwrap();

                prop_assert_eq!(series.len(), steps.len());
                prop_assert!(series.values().iter().all(|v| v.is_finite()));
                prop_assert!(series
                    .points()
                    .windows(2)
                    .all(|pair| pair[0].timestamp < pair[1].timestamp));
                let expected: Vec<f64> = steps.iter().map(|&(_, v)| v).collect();
                prop_assert_eq!(series.values(), expected);
            }

            #[test]
            fn test_repeated_timestamp_is_rejected(
                (start, steps) in points_strategy(),
                at in any::<prop::sample::Index>(),
            ) {
                prop_assume!(steps.len() >= 2);
                let mut steps = steps;
                let index = 1 + at.index(steps.len() - 1);
                steps[index].0 = 0;

                prop_assert_eq!(
                    load(&build(start, &steps)),
                    Err(LoadError::NonMonotonicTimestamps { index })
                );
            }
        }
    }

    #[test]
    fn test_load_mixed_timestamp_forms_normalised() {
        let input = raw(json!({
            "symbol": "MIX",
            "points": [
                {"t": 0, "v": 1},
                {"t": "0.5", "v": 2},
                {"t": "1970-01-01T00:00:01Z", "v": 3}
            ]
        }));
        let series = load(&input).unwrap();
        assert_eq!(series.len(), 3);
    }
}
