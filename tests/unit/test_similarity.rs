use sitesearch::cosine_similarity;

#[test]
fn test_identical_vectors_score_one() {
    let v = vec![0.1, 0.7, 0.2, 0.4];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn test_identical_direction_ignores_magnitude() {
    let a = vec![1.0, 2.0, 3.0];
    let b = vec![2.0, 4.0, 6.0];
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
}

#[test]
fn test_orthogonal_vectors_score_zero() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!(cosine_similarity(&[3.0, 0.0, 0.0], &[0.0, 0.0, 5.0]).abs() < 1e-6);
}

#[test]
fn test_opposite_vectors_score_negative_one() {
    assert!((cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]) + 1.0).abs() < 1e-6);
}

#[test]
fn test_zero_magnitude_is_defined_as_zero() {
    let zero = vec![0.0, 0.0, 0.0];
    let other = vec![1.0, 2.0, 3.0];

    let score = cosine_similarity(&zero, &other);
    assert_eq!(score, 0.0);
    assert!(!score.is_nan());

    let score = cosine_similarity(&other, &zero);
    assert_eq!(score, 0.0);

    let score = cosine_similarity(&zero, &zero);
    assert_eq!(score, 0.0);
}

#[test]
fn test_symmetry() {
    let a = vec![0.2, 0.9, 0.1];
    let b = vec![0.5, 0.4, 0.8];
    assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-6);
}

#[test]
fn test_score_stays_within_unit_range_modulo_rounding() {
    let a = vec![0.31, 0.47, 0.22, 0.85];
    let b = vec![0.11, 0.93, 0.56, 0.04];
    let score = cosine_similarity(&a, &b);
    assert!(score <= 1.0 + f32::EPSILON);
    assert!(score >= -1.0 - f32::EPSILON);
}
