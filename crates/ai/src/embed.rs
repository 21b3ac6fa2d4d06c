use std::future::Future;

use anyhow::anyhow;
use async_openai::{
  Client,
  config::OpenAIConfig,
  types::embeddings::{
    CreateEmbeddingRequest, CreateEmbeddingRequestArgs, Embedding as ResponseEmbedding,
    EmbeddingInput,
  },
};
use textsim_shared::{AppEnv, AppError};
use tracing::debug;

use crate::Embedding;

/// Turns text into embeddings.
pub trait Embed: Send + Sync {
  fn embed(&self, input: &str) -> impl Future<Output = Result<Embedding, AppError>> + Send;

  /// Embed multiple texts, returning one `Embedding` per input in the same order.
  fn embed_many(
    &self,
    inputs: &[String],
  ) -> impl Future<Output = Result<Vec<Embedding>, AppError>> + Send {
    async move {
      let mut embeddings = Vec::with_capacity(inputs.len());
      for input in inputs {
        embeddings.push(self.embed(input).await?);
      }
      Ok(embeddings)
    }
  }
}

/// Embedder backed by an OpenAI-compatible `/embeddings` endpoint.
#[derive(Clone)]
pub struct OpenAIEmbedder {
  client: Client<OpenAIConfig>,
  model: String,
  dimensions: Option<u32>,
}

impl OpenAIEmbedder {
  pub fn new(env: &AppEnv) -> Self {
    let config = OpenAIConfig::new()
      .with_api_key(&env.openai_api_key)
      .with_api_base(&env.openai_base_url);

    Self {
      client: Client::with_config(config),
      model: env.openai_embedding_model.clone(),
      dimensions: env.openai_embedding_dimensions,
    }
  }

  pub fn model(&self) -> &str {
    &self.model
  }

  pub fn dimensions(&self) -> Option<u32> {
    self.dimensions
  }

  fn request(
    &self,
    input: impl Into<EmbeddingInput>,
  ) -> Result<CreateEmbeddingRequest, AppError> {
    let mut args = CreateEmbeddingRequestArgs::default();
    args.model(&self.model).input(input);
    if let Some(dimensions) = self.dimensions {
      args.dimensions(dimensions);
    }
    Ok(args.build()?)
  }
}

/// Order response data by `index` and check it holds one vector per input.
fn collect(
  mut data: Vec<ResponseEmbedding>,
  expected: usize,
) -> Result<Vec<Embedding>, AppError> {
  if data.is_empty() {
    return Err(anyhow!("empty embedding").into());
  }

  // Sort by index to ensure ordering matches input
  data.sort_by_key(|e| e.index);

  if data.len() != expected {
    return Err(
      anyhow!(
        "embedding count mismatch: expected {}, got {}",
        expected,
        data.len()
      )
      .into(),
    );
  }

  Ok(
    data
      .into_iter()
      .map(|e| Embedding::from_f32(e.embedding))
      .collect(),
  )
}

impl Embed for OpenAIEmbedder {
  async fn embed(&self, input: &str) -> Result<Embedding, AppError> {
    let request = self.request(input)?;
    let response = self.client.embeddings().create(request).await?;

    let embedding = collect(response.data, 1)?
      .pop()
      .ok_or_else(|| anyhow!("empty embedding"))?;

    debug!(model = %self.model, dimensions = embedding.dimensions(), "embedded input");
    Ok(embedding)
  }

  /// Embed multiple texts in a single API call.
  async fn embed_many(&self, inputs: &[String]) -> Result<Vec<Embedding>, AppError> {
    if inputs.is_empty() {
      return Ok(vec![]);
    }

    let request = self.request(inputs.to_vec())?;
    let response = self.client.embeddings().create(request).await?;
    let embeddings = collect(response.data, inputs.len())?;

    debug!(model = %self.model, count = embeddings.len(), "embedded batch");
    Ok(embeddings)
  }
}
