use textsim_shared::{AppError, SimilarityError, cosine_similarity};
use tracing::{debug, warn};

use crate::{Embed, Embedding};

/// Both embeddings of a compared pair, plus their score.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
  pub first: Embedding,
  pub second: Embedding,
  /// Kept as a `Result` so a degenerate pair still exposes its embeddings.
  pub score: Result<f64, SimilarityError>,
}

impl Comparison {
  pub fn new(first: Embedding, second: Embedding) -> Self {
    let score = cosine_similarity(first.as_slice(), second.as_slice());
    Self {
      first,
      second,
      score,
    }
  }

  /// Whether both single-precision views hold exactly the same values.
  pub fn same_f32(&self) -> bool {
    self.first.to_f32() == self.second.to_f32()
  }
}

/// Embed both texts and score their embeddings with `cosine_similarity`.
///
/// Only embedding failures return `Err`. A zero-magnitude embedding shows up
/// as `SimilarityError::DegenerateVector` in [`Comparison::score`].
pub async fn compare<E: Embed>(
  embedder: &E,
  first: &str,
  second: &str,
) -> Result<Comparison, AppError> {
  let (a, b) = tokio::try_join!(embedder.embed(first), embedder.embed(second))?;

  if a.dimensions() != b.dimensions() {
    warn!(
      first_dimensions = a.dimensions(),
      second_dimensions = b.dimensions(),
      "embedding dimensions differ, shorter vector is zero-padded"
    );
  }

  let comparison = Comparison::new(a, b);
  debug!(first, second, score = ?comparison.score, "compared texts");

  Ok(comparison)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use anyhow::anyhow;

  use super::*;

  struct FakeEmbedder {
    vectors: HashMap<&'static str, Vec<f64>>,
  }

  impl FakeEmbedder {
    fn new(pairs: Vec<(&'static str, Vec<f64>)>) -> Self {
      Self {
        vectors: pairs.into_iter().collect(),
      }
    }
  }

  impl Embed for FakeEmbedder {
    async fn embed(&self, input: &str) -> Result<Embedding, AppError> {
      self
        .vectors
        .get(input)
        .cloned()
        .map(Embedding::new)
        .ok_or_else(|| anyhow!("no embedding for {input:?}").into())
    }
  }

  #[tokio::test]
  async fn test_compare_scores_embeddings() {
    let embedder = FakeEmbedder::new(vec![
      ("see you tomorrow", vec![1.0, 2.0, 3.0]),
      ("see you later", vec![4.0, 5.0, 6.0]),
    ]);
    let comparison = compare(&embedder, "see you tomorrow", "see you later")
      .await
      .unwrap();
    assert_eq!(comparison.first.sum(), 6.0);
    assert_eq!(comparison.second.sum(), 15.0);
    assert!(!comparison.same_f32());

    let score = comparison.score.unwrap();
    let expected = 32.0 / (14.0_f64.sqrt() * 77.0_f64.sqrt());
    assert!((score - expected).abs() < 1e-12);
  }

  #[tokio::test]
  async fn test_compare_pads_mismatched_dimensions() {
    let embedder = FakeEmbedder::new(vec![
      ("short", vec![1.0, 0.0]),
      ("long", vec![1.0, 0.0, 0.0]),
    ]);
    let comparison = compare(&embedder, "short", "long").await.unwrap();
    assert_eq!(comparison.first.dimensions(), 2);
    assert_eq!(comparison.second.dimensions(), 3);
    let score = comparison.score.unwrap();
    assert!((score - 1.0).abs() < 1e-12);
  }

  #[tokio::test]
  async fn test_compare_degenerate_embedding() {
    let embedder = FakeEmbedder::new(vec![
      ("silence", vec![0.0, 0.0]),
      ("noise", vec![0.3, 0.4]),
    ]);
    let comparison = compare(&embedder, "silence", "noise").await.unwrap();
    assert_eq!(comparison.score, Err(SimilarityError::DegenerateVector));
    assert_eq!(comparison.first.sum(), 0.0);

    let err = AppError::from(comparison.score.unwrap_err());
    assert_eq!(
      err.downcast_ref::<SimilarityError>(),
      Some(&SimilarityError::DegenerateVector)
    );
  }

  #[tokio::test]
  async fn test_compare_propagates_embed_failure() {
    let embedder = FakeEmbedder::new(vec![("known", vec![1.0])]);
    let err = compare(&embedder, "known", "unknown").await.unwrap_err();
    assert_eq!(err.to_string(), "no embedding for \"unknown\"");
    assert!(err.downcast_ref::<SimilarityError>().is_none());
  }

  #[tokio::test]
  async fn test_same_text_gives_same_f32_view() {
    let embedder = FakeEmbedder::new(vec![("see you later", vec![0.1, 0.2, 0.3])]);
    let comparison = compare(&embedder, "see you later", "see you later")
      .await
      .unwrap();
    assert!(comparison.same_f32());
    assert!((comparison.score.unwrap() - 1.0).abs() < 1e-12);
  }

  #[tokio::test]
  async fn test_default_embed_many_keeps_order() {
    let embedder = FakeEmbedder::new(vec![("a", vec![1.0]), ("b", vec![2.0, 3.0])]);
    let inputs = vec!["b".to_owned(), "a".to_owned()];
    let embeddings = embedder.embed_many(&inputs).await.unwrap();
    assert_eq!(
      embeddings,
      vec![Embedding::new(vec![2.0, 3.0]), Embedding::new(vec![1.0])]
    );
  }
}
