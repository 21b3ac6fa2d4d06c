// The binary only depends on this crate
pub use textsim_shared::{AppEnv, AppError, DEGENERATE_SCORE, SimilarityError};

mod compare;
pub use compare::{Comparison, compare};

mod embed;
pub use embed::{Embed, OpenAIEmbedder};

mod embedding;
pub use embedding::Embedding;
