pub mod fuzzy;
pub mod known;
pub mod normalize;
pub mod pipeline;
pub mod policy;

pub use pipeline::{Resolution, ResolutionStage, Resolver};
