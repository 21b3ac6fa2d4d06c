use std::{backtrace::Backtrace, fmt::Display};

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
}

impl AppError {
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self { err: err.into() }
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }

  /// Recover a typed error, e.g. a `SimilarityError` raised while scoring.
  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: Display + std::fmt::Debug + Send + Sync + 'static,
  {
    self.err.downcast_ref::<E>()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:#}", self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}
