use payee_resolver::commands::batch::{self, BatchOptions};
use payee_resolver::commands::model::{self, ModelOptions};
use payee_resolver::commands::resolve::{self, ResolveOptions};
use payee_resolver::{ResolverResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ResolverResult<SuccessEnvelope> {
    let corpus_override = cli.corpus.as_deref();
    match &cli.command {
        Commands::Resolve { payee, .. } => resolve::run_with_options(ResolveOptions {
            payee: payee.clone(),
            corpus_override,
        }),
        Commands::Batch { input, output, .. } => batch::run_with_options(BatchOptions {
            input: input.clone(),
            output: Some(output.clone()),
            corpus_override,
        }),
        Commands::Model { .. } => model::run_with_options(ModelOptions { corpus_override }),
    }
}
