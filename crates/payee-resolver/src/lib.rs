pub mod cluster;
pub mod commands;
pub mod contracts;
pub mod corpus;
pub mod error;
pub mod reference;
pub mod resolution;

pub use cluster::{ClusterConfig, ClusterModel, ClusterOutcome, NoMatchReason};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ResolverError, ResolverResult};
pub use resolution::normalize::normalize;
pub use resolution::{Resolution, ResolutionStage, Resolver};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
