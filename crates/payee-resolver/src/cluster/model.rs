use std::collections::HashMap;

use log::{debug, info};

use crate::cluster::kmeans::{Centroid, KMeansConfig, fit_kmeans, nearest_centroid};
use crate::cluster::vectorizer::CharNgramVectorizer;
use crate::resolution::normalize::title_case;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Tuning for the payee clusterer.
#[derive(Debug, Clone, Copy)]
pub struct ClusterConfig {
    pub clusters: usize,
    pub min_ngram: usize,
    pub max_ngram: usize,
    /// Largest Euclidean distance to a centroid that still counts as a member.
    /// Unit TF-IDF vectors are at most sqrt(2) apart.
    pub max_distance: f64,
    pub max_iterations: usize,
    pub restarts: usize,
    pub seed: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            clusters: 3,
            min_ngram: 3,
            max_ngram: 5,
            max_distance: 0.8,
            max_iterations: 300,
            restarts: 10,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PayeeCluster {
    pub label: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoMatchReason {
    TooShort,
    OutOfVocabulary,
    TooDistant { distance: f64 },
    UnlabeledCluster,
}

impl NoMatchReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::OutOfVocabulary => "out_of_vocabulary",
            Self::TooDistant { .. } => "too_distant",
            Self::UnlabeledCluster => "unlabeled_cluster",
        }
    }
}

/// Result of asking the model for a payee's cluster.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterOutcome {
    Matched {
        label: String,
        cluster: usize,
        distance: f64,
    },
    NoMatch(NoMatchReason),
    ModelUnavailable,
}

impl ClusterOutcome {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Matched { label, .. } => Some(label.as_str()),
            Self::NoMatch(_) | Self::ModelUnavailable => None,
        }
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    vectorizer: CharNgramVectorizer,
    centroids: Vec<Centroid>,
    clusters: Vec<PayeeCluster>,
}

/// Character n-gram TF-IDF + K-means model over historical payee strings.
///
/// Built once by [`ClusterModel::fit`] and never mutated afterwards; share it
/// behind an `Arc` for concurrent prediction.
#[derive(Debug, Clone)]
pub struct ClusterModel {
    config: ClusterConfig,
    corpus_size: usize,
    fitted: Option<FittedState>,
}

impl ClusterModel {
    pub fn unfitted(config: ClusterConfig) -> Self {
        Self {
            config,
            corpus_size: 0,
            fitted: None,
        }
    }

    /// Fits the model on raw payee strings. An empty corpus yields an unfitted
    /// model.
    pub fn fit(corpus: &[String], config: ClusterConfig) -> Self {
        if corpus.is_empty() {
            return Self::unfitted(config);
        }

        let vectorizer = CharNgramVectorizer::fit(corpus, config.min_ngram, config.max_ngram);
        let points = corpus
            .iter()
            .map(|document| vectorizer.transform(document))
            .collect::<Vec<_>>();

        let mut clusters = config.clusters.max(1);
        if corpus.len() < clusters {
            clusters = (corpus.len() / 2).max(1);
        }

        let fit = fit_kmeans(
            &points,
            vectorizer.feature_count(),
            KMeansConfig {
                clusters,
                max_iterations: config.max_iterations,
                restarts: config.restarts,
                seed: config.seed,
            },
        );

        let mut grouped: Vec<Vec<String>> = vec![Vec::new(); fit.centroids.len()];
        for (document, cluster) in corpus.iter().zip(fit.assignments.iter()) {
            grouped[*cluster].push(document.clone());
        }

        let clusters = grouped
            .into_iter()
            .map(|members| PayeeCluster {
                label: derive_label(&members),
                members,
            })
            .collect::<Vec<PayeeCluster>>();

        info!(
            "fitted payee cluster model: documents={}, clusters={}, features={}, inertia={:.4}, iterations={}",
            corpus.len(),
            clusters.len(),
            vectorizer.feature_count(),
            fit.inertia,
            fit.iterations
        );

        Self {
            config,
            corpus_size: corpus.len(),
            fitted: Some(FittedState {
                vectorizer,
                centroids: fit.centroids,
                clusters,
            }),
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn config(&self) -> ClusterConfig {
        self.config
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    pub fn clusters(&self) -> &[PayeeCluster] {
        match &self.fitted {
            Some(state) => &state.clusters,
            None => &[],
        }
    }

    pub fn feature_count(&self) -> usize {
        self.fitted
            .as_ref()
            .map(|state| state.vectorizer.feature_count())
            .unwrap_or(0)
    }

    pub fn predict(&self, raw: &str) -> ClusterOutcome {
        let Some(state) = &self.fitted else {
            return ClusterOutcome::ModelUnavailable;
        };

        if raw.trim().chars().count() < 2 {
            return ClusterOutcome::NoMatch(NoMatchReason::TooShort);
        }

        let vector = state.vectorizer.transform(raw);
        if vector.is_empty() {
            return ClusterOutcome::NoMatch(NoMatchReason::OutOfVocabulary);
        }

        let Some((cluster, distance)) = nearest_centroid(&state.centroids, &vector) else {
            return ClusterOutcome::ModelUnavailable;
        };

        if distance > self.config.max_distance {
            debug!("cluster prediction rejected: distance={distance:.4}");
            return ClusterOutcome::NoMatch(NoMatchReason::TooDistant { distance });
        }

        let label = &state.clusters[cluster].label;
        if label == UNKNOWN_LABEL {
            return ClusterOutcome::NoMatch(NoMatchReason::UnlabeledCluster);
        }

        ClusterOutcome::Matched {
            label: label.clone(),
            cluster,
            distance,
        }
    }
}

/// Picks the most common letters-and-spaces form of the members, ties going
/// to the earliest member, and title-cases it.
fn derive_label(members: &[String]) -> String {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for member in members {
        let cleaned = member
            .chars()
            .filter(|character| character.is_alphabetic() || character.is_whitespace())
            .collect::<String>()
            .trim()
            .to_string();
        if cleaned.is_empty() {
            continue;
        }
        let count = counts.entry(cleaned.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(cleaned);
        }
        *count += 1;
    }

    let mut best: Option<(&String, usize)> = None;
    for candidate in &first_seen {
        let count = counts.get(candidate).copied().unwrap_or(0);
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((candidate, count)),
        }
    }

    match best {
        Some((label, _)) => title_case(label),
        None => UNKNOWN_LABEL.to_string(),
    }
}
