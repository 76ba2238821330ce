use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::reference::bundled_corpus;
use crate::{ResolverError, ResolverResult};

pub const CORPUS_ENV_VAR: &str = "PAYEE_RESOLVER_CORPUS";

/// Where the clusterer's training strings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    Bundled,
    File(PathBuf),
}

impl CorpusSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// An explicit override wins, then `PAYEE_RESOLVER_CORPUS`, then the bundled
/// corpus.
pub fn resolve_corpus_source(corpus_override: Option<&Path>) -> CorpusSource {
    source_from(corpus_override, std::env::var_os(CORPUS_ENV_VAR))
}

fn source_from(corpus_override: Option<&Path>, env_value: Option<OsString>) -> CorpusSource {
    if let Some(path) = corpus_override {
        return CorpusSource::File(path.to_path_buf());
    }
    match env_value {
        Some(value) if !value.is_empty() => CorpusSource::File(PathBuf::from(value)),
        _ => CorpusSource::Bundled,
    }
}

pub fn load_corpus(source: &CorpusSource) -> ResolverResult<Vec<String>> {
    match source {
        CorpusSource::Bundled => Ok(bundled_corpus()),
        CorpusSource::File(path) => load_corpus_file(path),
    }
}

/// Reads one raw payee per line. Blank lines are skipped; other lines are kept
/// verbatim apart from the line terminator.
pub fn load_corpus_file(path: &Path) -> ResolverResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|error| ResolverError::corpus_unreadable(path, &error.to_string()))?;

    let corpus = parse_corpus(&content);
    if corpus.is_empty() {
        return Err(ResolverError::corpus_empty(path));
    }

    info!(
        "loaded training corpus: path={}, documents={}",
        path.display(),
        corpus.len()
    );
    Ok(corpus)
}

fn parse_corpus(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
