/// A single embedding vector as returned by the encoder.
///
/// Providers hand back `f32`; values are widened to `f64` so scoring runs in
/// double precision.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Embedding {
  vector: Vec<f64>,
}

impl Embedding {
  pub fn new(vector: Vec<f64>) -> Self {
    Self { vector }
  }

  pub fn from_f32(vector: Vec<f32>) -> Self {
    Self {
      vector: vector.into_iter().map(f64::from).collect(),
    }
  }

  pub fn as_slice(&self) -> &[f64] {
    &self.vector
  }

  pub fn dimensions(&self) -> usize {
    self.vector.len()
  }

  /// Sum of all components.
  pub fn sum(&self) -> f64 {
    self.vector.iter().sum()
  }

  /// Single-precision view of the same data.
  pub fn to_f32(&self) -> Vec<f32> {
    self.vector.iter().map(|&x| x as f32).collect()
  }

  /// The first `limit` components, or all of them if there are fewer.
  pub fn head(&self, limit: usize) -> &[f64] {
    &self.vector[..limit.min(self.vector.len())]
  }
}
