use thiserror::Error;

/// Score reported alongside [`SimilarityError::DegenerateVector`].
pub const DEGENERATE_SCORE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimilarityError {
  /// One of the vectors has zero magnitude, so the angle is undefined.
  #[error("vectors should not be null (all zeros)")]
  DegenerateVector,
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in [-1.0, 1.0] where 1.0 means identical direction. The
/// bounds hold within floating-point tolerance: the quotient is not clamped,
/// so parallel vectors can land one ulp outside the interval.
///
/// Vectors of different length are compared as if the shorter one were
/// padded with zeros. The extra coordinates of the longer vector add to its
/// magnitude but never to the dot product, so a length mismatch always pulls
/// the score towards zero. This is intentional: mismatched embeddings are
/// penalized rather than truncated or rejected.
///
/// Fails with [`SimilarityError::DegenerateVector`] when either (padded)
/// vector has a sum of squares of exactly zero, which includes empty input.
/// NaN and infinite components are not checked and propagate into the result.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
  let mut dot = 0.0_f64;
  let mut norm_a = 0.0_f64;
  let mut norm_b = 0.0_f64;

  for (&x, &y) in a.iter().zip(b.iter()) {
    dot += x * y;
    norm_a += x.powi(2);
    norm_b += y.powi(2);
  }

  // At most one of these tails is non-empty.
  let shared = a.len().min(b.len());
  for &x in &a[shared..] {
    norm_a += x.powi(2);
  }
  for &y in &b[shared..] {
    norm_b += y.powi(2);
  }

  if norm_a == 0.0 || norm_b == 0.0 {
    return Err(SimilarityError::DegenerateVector);
  }

  Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
