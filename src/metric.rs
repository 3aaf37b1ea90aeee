use crate::error::DriftError;

/// Cosine distance `1 - cos(a, b)`. Identical direction yields 0, orthogonal 1,
/// opposite 2. The range is not clamped.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> Result<f64, DriftError> {
    if a.len() != b.len() {
        return Err(DriftError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    if mag_a == 0.0 || mag_b == 0.0 {
        return Err(DriftError::ZeroMagnitude);
    }

    Ok(1.0 - dot / (mag_a.sqrt() * mag_b.sqrt()))
}

/// Rounds to 4 decimal places, half away from zero.
pub fn round_score(score: f64) -> f64 {
    // adding 0.0 turns a rounded -0.0 into 0.0
    (score * 10_000.0).round() / 10_000.0 + 0.0
}

#[cfg(test)]
mod tests {
    use crate::error::DriftError;
    use crate::metric::{cosine_distance, round_score};

    #[test]
    fn same_vector_has_zero_distance() {
        for v in [
            vec![2.0, 3.0, 4.0],
            vec![-1.0, 0.25, 1e-3, 9.0],
            vec![1e6],
        ] {
            let d = cosine_distance(&v, &v).expect("distance");
            assert!(d.abs() < 1e-6, "distance {d} for {v:?}");
        }
    }

    #[test]
    fn orthogonal_unit_vectors_have_distance_one() {
        let d = cosine_distance(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).expect("distance");
        assert!((d - 1.0).abs() < 1e-6);
        let d = cosine_distance(&[0.0, 0.0, 1.0], &[0.0, -1.0, 0.0]).expect("distance");
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_have_distance_two() {
        let d = cosine_distance(&[1.0, 2.0], &[-2.0, -4.0]).expect("distance");
        assert!((d - 2.0).abs() < 1e-9);
    }

    #[test]
    fn differing_lengths_are_rejected() {
        let pairs: [(&[f64], &[f64]); 3] = [
            (&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            (&[], &[1.0]),
            (&[0.0, 0.0, 0.0], &[1.0]),
        ];
        for (a, b) in pairs {
            let err = cosine_distance(a, b).unwrap_err();
            assert!(
                matches!(err, DriftError::LengthMismatch { left, right } if left == a.len() && right == b.len())
            );
        }
    }

    #[test]
    fn zero_vector_is_rejected() {
        assert!(matches!(
            cosine_distance(&[0.0, 0.0], &[1.0, 2.0]),
            Err(DriftError::ZeroMagnitude)
        ));
        assert!(matches!(
            cosine_distance(&[1.0, 2.0], &[0.0, 0.0]),
            Err(DriftError::ZeroMagnitude)
        ));
        assert!(matches!(
            cosine_distance(&[], &[]),
            Err(DriftError::ZeroMagnitude)
        ));
    }

    #[test]
    fn rounds_to_four_decimals() {
        assert_eq!(round_score(0.123456), 0.1235);
        assert_eq!(round_score(0.12344), 0.1234);
        assert_eq!(round_score(1.0), 1.0);
        let tiny_negative = round_score(-2.0e-16);
        assert_eq!(tiny_negative, 0.0);
        assert!(tiny_negative.is_sign_positive());
    }
}
