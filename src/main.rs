use std::process::ExitCode;

use clap::Parser;
use textsim_ai::{
  AppEnv, AppError, Comparison, DEGENERATE_SCORE, OpenAIEmbedder, SimilarityError, compare,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print the cosine similarity between the embeddings of two texts.
#[derive(Debug, Parser)]
#[command(name = "textsim", version, about)]
struct Cli {
  /// First text
  #[arg(default_value = "see you tomorrow")]
  first: String,

  /// Second text
  #[arg(default_value = "see you later")]
  second: String,

  /// Embedding model (overrides OPENAI_EMBEDDING_MODEL)
  #[arg(long)]
  embedding_model: Option<String>,

  /// Output dimensions (overrides OPENAI_EMBEDDING_DIMENSIONS)
  #[arg(long)]
  dimensions: Option<u32>,

  /// Also print leading components, sums and whether the f32 views match
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn apply(&self, env: &mut AppEnv) {
    if let Some(model) = &self.embedding_model {
      env.openai_embedding_model.clone_from(model);
    }
    if self.dimensions.is_some() {
      env.openai_embedding_dimensions = self.dimensions;
    }
  }
}

/// Components shown per embedding in verbose output.
const PREVIEW_LIMIT: usize = 10;

fn report(comparison: &Comparison) -> String {
  let mut lines: Vec<String> = [("first", &comparison.first), ("second", &comparison.second)]
    .iter()
    .map(|(label, embedding)| {
      format!(
        "{label}: {:?} ({} dimensions, sum {})",
        embedding.head(PREVIEW_LIMIT),
        embedding.dimensions(),
        embedding.sum()
      )
    })
    .collect();
  lines.push(format!("same f32 view: {}", comparison.same_f32()));
  lines.join("\n")
}

/// Score to print when the failure still has a defined value.
fn fallback_score(err: &AppError) -> Option<f64> {
  err
    .downcast_ref::<SimilarityError>()
    .map(|_| DEGENERATE_SCORE)
}

async fn run(cli: &Cli) -> Result<(), AppError> {
  let mut env = AppEnv::from_env()?;
  cli.apply(&mut env);

  let embedder = OpenAIEmbedder::new(&env);
  tracing::info!(
    model = embedder.model(),
    dimensions = ?embedder.dimensions(),
    "comparing texts"
  );

  let comparison = compare(&embedder, &cli.first, &cli.second).await?;
  if cli.verbose {
    println!("{}", report(&comparison));
  }

  let score = comparison.score?;
  println!("{score}");

  Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
  dotenvy::dotenv().ok();
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let cli = Cli::parse();
  match run(&cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      if let Some(score) = fallback_score(&err) {
        println!("{score}");
      }
      eprintln!("error: {err}");
      ExitCode::FAILURE
    }
  }
}
