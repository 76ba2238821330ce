pub mod kmeans;
pub mod model;
pub mod vectorizer;

pub use model::{ClusterConfig, ClusterModel, ClusterOutcome, NoMatchReason, PayeeCluster};
