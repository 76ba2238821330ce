use std::sync::Arc;

use log::debug;

use crate::cluster::{ClusterConfig, ClusterModel, ClusterOutcome};
use crate::resolution::fuzzy::match_fuzzy;
use crate::resolution::known::match_known;
use crate::resolution::normalize::{normalize, title_case};
use crate::resolution::policy::{RESOLUTION_POLICY_V1, ResolutionPolicy};

/// Cascade stage that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionStage {
    Known,
    Fuzzy,
    Cluster,
    Fallback,
    Empty,
}

impl ResolutionStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Known => "known",
            Self::Fuzzy => "fuzzy",
            Self::Cluster => "cluster",
            Self::Fallback => "fallback",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub name: String,
    pub confidence: f64,
    pub stage: ResolutionStage,
    /// What the cluster model said, when the cascade got that far.
    pub cluster_outcome: Option<ClusterOutcome>,
}

/// Runs the resolution cascade over a shared, already fitted cluster model.
///
/// Cloning is cheap and every clone shares the same model.
#[derive(Debug, Clone)]
pub struct Resolver {
    model: Arc<ClusterModel>,
    policy: ResolutionPolicy,
}

impl Resolver {
    pub fn new(model: Arc<ClusterModel>) -> Self {
        Self {
            model,
            policy: RESOLUTION_POLICY_V1,
        }
    }

    pub fn with_policy(model: Arc<ClusterModel>, policy: ResolutionPolicy) -> Self {
        Self { model, policy }
    }

    /// Fits a fresh model on `corpus` and wraps it.
    pub fn from_corpus(corpus: &[String], config: ClusterConfig) -> Self {
        Self::new(Arc::new(ClusterModel::fit(corpus, config)))
    }

    pub fn model(&self) -> &ClusterModel {
        &self.model
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Resolves a raw payee string. Never fails; unmatched input degrades to
    /// a low-confidence title-cased fallback.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let cleaned = normalize(raw);

        if let Some(hit) = match_known(&cleaned, self.policy) {
            debug!("known payee match: key={} cleaned={cleaned:?}", hit.key);
            return Resolution {
                name: hit.name.to_string(),
                confidence: hit.confidence,
                stage: ResolutionStage::Known,
                cluster_outcome: None,
            };
        }

        if let Some(hit) = match_fuzzy(&cleaned, self.policy) {
            debug!(
                "fuzzy payee match: key={} ratio={:.4} cleaned={cleaned:?}",
                hit.key, hit.confidence
            );
            return Resolution {
                name: hit.name.to_string(),
                confidence: hit.confidence,
                stage: ResolutionStage::Fuzzy,
                cluster_outcome: None,
            };
        }

        // The model was fit on raw statement text, so it sees the raw input.
        let outcome = self.model.predict(raw);
        if let Some(label) = outcome.label() {
            return Resolution {
                name: label.to_string(),
                confidence: self.policy.cluster_confidence,
                stage: ResolutionStage::Cluster,
                cluster_outcome: Some(outcome.clone()),
            };
        }

        match &outcome {
            ClusterOutcome::NoMatch(reason) => {
                debug!("cluster stage skipped: reason={}", reason.as_str());
            }
            ClusterOutcome::ModelUnavailable => {
                debug!("cluster stage skipped: model unavailable");
            }
            ClusterOutcome::Matched { .. } => {}
        }

        if cleaned.is_empty() {
            return Resolution {
                name: raw.to_string(),
                confidence: self.policy.empty_confidence,
                stage: ResolutionStage::Empty,
                cluster_outcome: Some(outcome),
            };
        }

        Resolution {
            name: title_case(&cleaned),
            confidence: self.policy.fallback_confidence,
            stage: ResolutionStage::Fallback,
            cluster_outcome: Some(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ResolutionStage, Resolver};
    use crate::cluster::{ClusterConfig, ClusterModel, ClusterOutcome};
    use crate::reference::bundled_corpus;

    fn bundled_resolver() -> Resolver {
        Resolver::from_corpus(&bundled_corpus(), ClusterConfig::default())
    }

    #[test]
    fn dictionary_beats_fuzzy_when_both_apply() {
        let resolution = bundled_resolver().resolve("Starbucks Coffee");
        assert_eq!(resolution.name, "Starbucks");
        assert_eq!(resolution.stage, ResolutionStage::Known);
        assert_eq!(resolution.confidence, 0.95);
    }

    #[test]
    fn fuzzy_stage_reports_ratio_as_confidence() {
        let resolution = bundled_resolver().resolve("SHEL OIL 123");
        assert_eq!(resolution.name, "Shell");
        assert_eq!(resolution.stage, ResolutionStage::Fuzzy);
        assert!(resolution.confidence >= 0.8 && resolution.confidence < 0.95);
    }

    #[test]
    fn cluster_stage_uses_raw_input() {
        let resolution = bundled_resolver().resolve("LAKE CITY SEATTLE WA");
        assert_eq!(resolution.stage, ResolutionStage::Cluster);
        assert_eq!(resolution.confidence, 0.85);
        assert!(resolution.name.contains("Lake City"));
    }

    #[test]
    fn unfitted_model_falls_through_to_fallback() {
        let resolver = Resolver::new(Arc::new(ClusterModel::unfitted(ClusterConfig::default())));
        let resolution = resolver.resolve("LAKE CITY SEATTLE WA");
        assert_eq!(resolution.name, "Lake City Seattle");
        assert_eq!(resolution.confidence, 0.4);
        assert_eq!(resolution.stage, ResolutionStage::Fallback);
        assert_eq!(
            resolution.cluster_outcome,
            Some(ClusterOutcome::ModelUnavailable)
        );
    }

    #[test]
    fn empty_cleaned_text_returns_raw_input() {
        let resolver = bundled_resolver();

        let digits = resolver.resolve("1");
        assert_eq!(digits.name, "1");
        assert_eq!(digits.confidence, 0.0);
        assert_eq!(digits.stage, ResolutionStage::Empty);

        let blank = resolver.resolve("");
        assert_eq!(blank.name, "");
        assert_eq!(blank.confidence, 0.0);
    }

    #[test]
    fn clones_share_one_model() {
        let resolver = bundled_resolver();
        let clone = resolver.clone();
        assert!(std::ptr::eq(resolver.model(), clone.model()));
    }
}
