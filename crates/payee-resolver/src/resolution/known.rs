use crate::reference::KNOWN_PAYEES;
use crate::resolution::policy::ResolutionPolicy;

/// A dictionary hit from either the substring scan or the fuzzy scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayeeMatch {
    pub key: &'static str,
    pub name: &'static str,
    pub confidence: f64,
}

/// Returns the first known payee (in table order) whose key occurs inside the
/// cleaned text.
pub fn match_known(cleaned: &str, policy: ResolutionPolicy) -> Option<PayeeMatch> {
    let haystack = cleaned.to_lowercase();
    if haystack.is_empty() {
        return None;
    }

    for (key, name) in KNOWN_PAYEES {
        let folded = fold_key(key);
        // Keys made only of digits or symbols can never survive normalization.
        if folded.is_empty() {
            continue;
        }
        if haystack.contains(&folded) {
            return Some(PayeeMatch {
                key,
                name,
                confidence: policy.known_confidence,
            });
        }
    }

    None
}

/// Folds a dictionary key into the alphabet normalized text is written in:
/// lowercase letters, single spaces and hyphens.
fn fold_key(key: &str) -> String {
    key.chars()
        .map(|character| {
            if character.is_ascii_lowercase() || character == '-' {
                character
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
