pub mod batch;
mod common;
pub mod model;
pub mod resolve;
