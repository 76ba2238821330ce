use crate::reference::KNOWN_PAYEES;
use crate::resolution::known::PayeeMatch;
use crate::resolution::policy::ResolutionPolicy;

/// Scores every known payee key against the cleaned text and returns the best
/// one when it clears the policy's fuzzy gate.
///
/// A key's score is the better of the whole-string ratio and the best
/// per-token ratio, so `STARBUKS EL CAMINO` still lands on `starbucks`. Only a
/// strictly greater score replaces the current best, which keeps ties on the
/// earlier table entry.
pub fn match_fuzzy(cleaned: &str, policy: ResolutionPolicy) -> Option<PayeeMatch> {
    let target = cleaned.to_lowercase();
    if target.is_empty() {
        return None;
    }

    let tokens = target.split_whitespace().collect::<Vec<&str>>();
    let mut best_ratio = 0.0f64;
    let mut best: Option<(&'static str, &'static str)> = None;

    for (key, name) in KNOWN_PAYEES {
        let full_ratio = similarity_ratio(&target, key);
        let token_ratio = tokens
            .iter()
            .map(|token| similarity_ratio(token, key))
            .fold(0.0f64, f64::max);
        let score = full_ratio.max(token_ratio);

        if score > best_ratio {
            best_ratio = score;
            best = Some((key, name));
        }
    }

    let (key, name) = best?;
    if !policy.accepts_fuzzy(best_ratio) {
        return None;
    }

    Some(PayeeMatch {
        key,
        name,
        confidence: best_ratio,
    })
}

/// Ratcliff/Obershelp similarity: `2 * matched / (len(a) + len(b))`, where
/// matched characters come from repeatedly taking the longest common block
/// and recursing on both sides of it. Two empty strings are identical.
pub fn similarity_ratio(left: &str, right: &str) -> f64 {
    let a = left.chars().collect::<Vec<char>>();
    let b = right.chars().collect::<Vec<char>>();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&a, &b);
    (2.0 * matched as f64) / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0usize;
    let mut pending = vec![(0usize, a.len(), 0usize, b.len())];

    while let Some((a_low, a_high, b_low, b_high)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_low, a_high, b_low, b_high);
        if size == 0 {
            continue;
        }

        matched += size;
        if a_low < i && b_low < j {
            pending.push((a_low, i, b_low, j));
        }
        if i + size < a_high && j + size < b_high {
            pending.push((i + size, a_high, j + size, b_high));
        }
    }

    matched
}

/// Longest common block inside `a[a_low..a_high]` and `b[b_low..b_high]`.
/// Ties resolve to the block that starts earliest in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_low: usize,
    a_high: usize,
    b_low: usize,
    b_high: usize,
) -> (usize, usize, usize) {
    let mut best_i = a_low;
    let mut best_j = b_low;
    let mut best_size = 0usize;

    let width = b_high.saturating_sub(b_low);
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in a_low..a_high {
        for j in b_low..b_high {
            let slot = j - b_low + 1;
            if a[i] == b[j] {
                let size = previous[slot - 1] + 1;
                current[slot] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            } else {
                current[slot] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (best_i, best_j, best_size)
}
