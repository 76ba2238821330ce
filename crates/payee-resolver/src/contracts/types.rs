use std::collections::BTreeMap;

use serde::Serialize;

/// Request/response payload for a single payee.
#[derive(Debug, Clone, Serialize)]
pub struct RealPayeeNameData {
    pub real_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub original_payee: String,
    pub real_name: String,
    pub confidence: f64,
    pub stage: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub rows_read: usize,
    pub rows_resolved: usize,
    pub rows_skipped: usize,
    /// Resolved row count keyed by cascade stage name.
    pub stages: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchData {
    pub input_path: String,
    pub output_path: String,
    pub payee_column: String,
    pub summary: BatchSummary,
    pub rows: Vec<BatchRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelClusterRow {
    pub cluster: usize,
    pub label: String,
    pub member_count: usize,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelData {
    pub fitted: bool,
    pub corpus_source: String,
    pub corpus_size: usize,
    pub cluster_count: usize,
    pub vocabulary_size: usize,
    pub max_distance: f64,
    pub policy_version: String,
    pub clusters: Vec<ModelClusterRow>,
}
