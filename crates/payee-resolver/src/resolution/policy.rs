/// Resolution policy identifier, echoed in model reports so threshold changes
/// stay visible in output diffs.
pub const RESOLUTION_POLICY_VERSION: &str = "resolution/v1";

/// Confidence assignments and gates for each cascade stage.
///
/// Confidence encodes which stage produced a name. It is not a calibrated
/// probability.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionPolicy {
    pub known_confidence: f64,
    pub fuzzy_min_ratio: f64,
    pub cluster_confidence: f64,
    pub fallback_confidence: f64,
    pub empty_confidence: f64,
}

impl ResolutionPolicy {
    pub fn accepts_fuzzy(self, ratio: f64) -> bool {
        ratio >= self.fuzzy_min_ratio
    }
}

pub const RESOLUTION_POLICY_V1: ResolutionPolicy = ResolutionPolicy {
    known_confidence: 0.95,
    fuzzy_min_ratio: 0.8,
    cluster_confidence: 0.85,
    fallback_confidence: 0.4,
    empty_confidence: 0.0,
};
