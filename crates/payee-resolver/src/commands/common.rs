use std::path::Path;

use crate::ResolverResult;
use crate::cluster::ClusterConfig;
use crate::corpus::{CorpusSource, load_corpus, resolve_corpus_source};
use crate::resolution::Resolver;

/// A resolver fitted for one command invocation, plus where its corpus came
/// from.
#[derive(Debug, Clone)]
pub(crate) struct CommandResolver {
    pub(crate) resolver: Resolver,
    pub(crate) source: CorpusSource,
}

pub(crate) fn build_resolver(corpus_override: Option<&Path>) -> ResolverResult<CommandResolver> {
    let source = resolve_corpus_source(corpus_override);
    let corpus = load_corpus(&source)?;
    Ok(CommandResolver {
        resolver: Resolver::from_corpus(&corpus, ClusterConfig::default()),
        source,
    })
}
