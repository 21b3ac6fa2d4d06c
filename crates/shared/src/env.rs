use std::env;

use anyhow::{Context, anyhow};

use crate::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
  pub openai_base_url: String,
  pub openai_api_key: String,
  pub openai_embedding_model: String,
  /// `None` keeps the model's native dimension.
  pub openai_embedding_dimensions: Option<u32>,
}

impl AppEnv {
  /// Read settings from the process environment.
  ///
  /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
  pub fn from_env() -> Result<Self, AppError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

    let openai_embedding_dimensions = lookup("OPENAI_EMBEDDING_DIMENSIONS")
      .map(|raw| {
        raw
          .trim()
          .parse::<u32>()
          .with_context(|| format!("OPENAI_EMBEDDING_DIMENSIONS is not a valid u32: {raw:?}"))
      })
      .transpose()?;

    Ok(Self {
      openai_base_url: required("OPENAI_BASE_URL")?,
      openai_api_key: required("OPENAI_API_KEY")?,
      openai_embedding_model: required("OPENAI_EMBEDDING_MODEL")?,
      openai_embedding_dimensions,
    })
  }
}
