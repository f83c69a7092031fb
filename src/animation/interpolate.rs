// ============================================================================
// Interpolation linéaire par morceaux
// ============================================================================
// Deux séries n'ont pas forcément le même nombre de points, ni les mêmes
// timestamps. On les compare donc par position normalisée le long de la série :
// le point i d'une série de n points est à la position u = i / (n - 1).
//
// EXEMPLE : source [10, 20] (2 points), cible de 3 points
// - positions de la grille : 0.0, 0.5, 1.0
// - source rééchantillonnée : [10, 15, 20]
// ============================================================================

/// Interpolation linéaire entre a et b
///
/// Forme a·(1 - t) + b·t : exacte aux extrémités (t = 0 → a, t = 1 → b)
/// et sans dépassement pour des valeurs finies.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Position normalisée du point `index` sur une grille de `count` points
pub fn grid_position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Valeur de la polyligne `values` à la position normalisée `u` ∈ [0, 1]
///
/// Une série d'un seul point est constante.
pub fn sample(values: &[f64], u: f64) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        n => {
            let pos = u.clamp(0.0, 1.0) * (n - 1) as f64;
            let i = (pos.floor() as usize).min(n - 2);
            lerp(values[i], values[i + 1], pos - i as f64)
        }
    }
}

/// Rééchantillonne `values` sur une grille de `count` points
///
/// Si la longueur est déjà la bonne, les valeurs sont recopiées telles quelles
/// (pas d'erreur d'arrondi sur les positions).
pub fn resample(values: &[f64], count: usize) -> Vec<f64> {
    if values.len() == count {
        return values.to_vec();
    }
    (0..count)
        .map(|i| sample(values, grid_position(i, count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_exact() {
        assert_eq!(lerp(10.0, 14.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 14.0, 1.0), 14.0);
        assert_eq!(lerp(10.0, 14.0, 0.5), 12.0);
    }

    #[test]
    fn test_lerp_large_values_stay_finite() {
        let v = lerp(-f64::MAX, f64::MAX, 0.5);
        assert!(v.is_finite());
    }

    #[test]
    fn test_grid_position() {
        assert_eq!(grid_position(0, 1), 0.0);
        assert_eq!(grid_position(0, 3), 0.0);
        assert_eq!(grid_position(1, 3), 0.5);
        assert_eq!(grid_position(2, 3), 1.0);
    }

    #[test]
    fn test_sample_single_point() {
        assert_eq!(sample(&[7.0], 0.0), 7.0);
        assert_eq!(sample(&[7.0], 0.8), 7.0);
    }

    #[test]
    fn test_resample_upsample() {
        assert_eq!(resample(&[10.0, 20.0], 3), vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_resample_downsample_keeps_endpoints() {
        let out = resample(&[1.0, 5.0, 2.0, 8.0, 3.0], 2);
        assert_eq!(out, vec![1.0, 3.0]);
    }

    #[test]
    fn test_resample_same_length_is_identity() {
        let values = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
        assert_eq!(resample(&values, values.len()), values.to_vec());
    }
}
