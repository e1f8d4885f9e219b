
mod config;
mod dataset;
mod error;
mod model;
mod pipeline;
mod similarity;
mod train;
mod visualize;
mod vocab;

pub use config::files_handling;
pub use config::{Config, JsonTrain, JsonTypes};
pub use dataset::{Batch, PairDataset};
pub use error::EmbedError;
pub use model::SkipGram;
pub use pipeline::Pipeline;
pub use similarity::{Cluster, Similarity};
pub use train::Trainer;
pub use visualize::{draw_clusters, reduce_clusters};
pub use vocab::Vocab;
