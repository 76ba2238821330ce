use std::path::Path;

use crate::ResolverResult;
use crate::commands::common::build_resolver;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RealPayeeNameData;
use crate::resolution::Resolver;

#[derive(Debug, Clone)]
pub struct ResolveOptions<'a> {
    pub payee: String,
    pub corpus_override: Option<&'a Path>,
}

/// Resolves one payee. Every string, including "", succeeds.
pub fn run(payee: &str) -> ResolverResult<SuccessEnvelope> {
    run_with_options(ResolveOptions {
        payee: payee.to_string(),
        corpus_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ResolveOptions<'_>) -> ResolverResult<SuccessEnvelope> {
    let loaded = build_resolver(options.corpus_override)?;
    success("resolve", real_payee_name(&loaded.resolver, &options.payee))
}

pub fn real_payee_name(resolver: &Resolver, payee: &str) -> RealPayeeNameData {
    let resolution = resolver.resolve(payee);
    RealPayeeNameData {
        real_name: resolution.name,
        confidence: resolution.confidence,
    }
}
