use std::path::Path;

use crate::ResolverResult;
use crate::commands::common::build_resolver;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ModelClusterRow, ModelData};
use crate::resolution::policy::RESOLUTION_POLICY_VERSION;

#[derive(Debug, Clone, Default)]
pub struct ModelOptions<'a> {
    pub corpus_override: Option<&'a Path>,
}

pub fn run() -> ResolverResult<SuccessEnvelope> {
    run_with_options(ModelOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: ModelOptions<'_>) -> ResolverResult<SuccessEnvelope> {
    let loaded = build_resolver(options.corpus_override)?;
    let model = loaded.resolver.model();

    let clusters = model
        .clusters()
        .iter()
        .enumerate()
        .map(|(cluster, payees)| ModelClusterRow {
            cluster,
            label: payees.label.clone(),
            member_count: payees.members.len(),
            members: payees.members.clone(),
        })
        .collect::<Vec<ModelClusterRow>>();

    let data = ModelData {
        fitted: model.is_fitted(),
        corpus_source: loaded.source.describe(),
        corpus_size: model.corpus_size(),
        cluster_count: clusters.len(),
        vocabulary_size: model.feature_count(),
        max_distance: model.config().max_distance,
        policy_version: RESOLUTION_POLICY_VERSION.to_string(),
        clusters,
    };
    success("model", data)
}
