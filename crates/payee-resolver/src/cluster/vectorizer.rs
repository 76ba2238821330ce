use std::collections::{BTreeMap, BTreeSet};

/// Sparse row keyed by feature index, kept sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value * value).sum()
    }

    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(index, value)| dense.get(*index).copied().unwrap_or(0.0) * value)
            .sum()
    }

    /// Squared Euclidean distance to a dense point whose squared norm is
    /// already known.
    pub fn squared_distance(&self, dense: &[f64], dense_squared_norm: f64) -> f64 {
        let distance = self.squared_norm() + dense_squared_norm - 2.0 * self.dot_dense(dense);
        distance.max(0.0)
    }
}

/// Character n-gram TF-IDF vectorizer with word-boundary padding.
///
/// Vocabulary and IDF weights are frozen at fit time; n-grams first seen at
/// transform time are dropped.
#[derive(Debug, Clone)]
pub struct CharNgramVectorizer {
    min_n: usize,
    max_n: usize,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl CharNgramVectorizer {
    pub fn fit(corpus: &[String], min_n: usize, max_n: usize) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in corpus {
            let distinct = char_wb_ngrams(document, min_n, max_n)
                .into_iter()
                .collect::<BTreeSet<String>>();
            for gram in distinct {
                *document_frequency.entry(gram).or_insert(0) += 1;
            }
        }

        let documents = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (gram, frequency)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + documents) / (1.0 + frequency as f64)).ln() + 1.0);
            vocabulary.insert(gram, index);
        }

        Self {
            min_n,
            max_n,
            vocabulary,
            idf,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.idf.len()
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in char_wb_ngrams(text, self.min_n, self.max_n) {
            if let Some(index) = self.vocabulary.get(&gram) {
                *counts.entry(*index).or_insert(0.0) += 1.0;
            }
        }

        let weighted = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect::<Vec<(usize, f64)>>();
        let norm = weighted
            .iter()
            .map(|(_, value)| value * value)
            .sum::<f64>()
            .sqrt();
        if norm == 0.0 {
            return SparseVector::default();
        }

        SparseVector {
            entries: weighted
                .into_iter()
                .map(|(index, value)| (index, value / norm))
                .collect(),
        }
    }
}

/// Word-bounded character n-grams over the lowercased text.
///
/// Each whitespace-delimited word is padded as `" word "`. A padded word
/// shorter than `n` contributes itself once and ends the scan for that word.
pub fn char_wb_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut grams = Vec::new();

    for word in lowered.split_whitespace() {
        let padded = format!(" {word} ").chars().collect::<Vec<char>>();
        let length = padded.len();

        for n in min_n..=max_n {
            let mut offset = 0usize;
            grams.push(padded[offset..(offset + n).min(length)].iter().collect());
            while offset + n < length {
                offset += 1;
                grams.push(padded[offset..offset + n].iter().collect());
            }
            if offset == 0 {
                break;
            }
        }
    }

    grams
}
