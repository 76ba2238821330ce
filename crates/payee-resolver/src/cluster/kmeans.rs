use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cluster::vectorizer::SparseVector;

#[derive(Debug, Clone, Copy)]
pub struct KMeansConfig {
    pub clusters: usize,
    pub max_iterations: usize,
    pub restarts: usize,
    pub seed: u64,
}

/// Dense cluster center with its cached squared norm.
#[derive(Debug, Clone)]
pub struct Centroid {
    pub values: Vec<f64>,
    pub squared_norm: f64,
}

impl Centroid {
    fn from_values(values: Vec<f64>) -> Self {
        let squared_norm = values.iter().map(|value| value * value).sum();
        Self {
            values,
            squared_norm,
        }
    }

    fn from_sparse(point: &SparseVector, dimensions: usize) -> Self {
        let mut values = vec![0.0; dimensions];
        for (index, value) in point.entries() {
            if let Some(slot) = values.get_mut(*index) {
                *slot = *value;
            }
        }
        Self::from_values(values)
    }

    pub fn distance_to(&self, point: &SparseVector) -> f64 {
        point
            .squared_distance(&self.values, self.squared_norm)
            .sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub centroids: Vec<Centroid>,
    pub assignments: Vec<usize>,
    pub inertia: f64,
    pub iterations: usize,
}

/// Lloyd's algorithm with seeded k-means++ starts.
///
/// Every restart draws from the same seeded generator, so identical input
/// always yields identical centroids. The restart with the lowest inertia
/// wins; equal inertia keeps the earlier restart.
pub fn fit_kmeans(points: &[SparseVector], dimensions: usize, config: KMeansConfig) -> KMeansFit {
    let clusters = config.clusters.max(1).min(points.len().max(1));
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut best: Option<KMeansFit> = None;

    for _ in 0..config.restarts.max(1) {
        let initial = kmeans_plus_plus(points, dimensions, clusters, &mut rng);
        let candidate = lloyd(points, dimensions, initial, config.max_iterations);
        let replace = match &best {
            Some(current) => candidate.inertia < current.inertia,
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    }

    best.unwrap_or_else(|| KMeansFit {
        centroids: Vec::new(),
        assignments: Vec::new(),
        inertia: 0.0,
        iterations: 0,
    })
}

/// Index of the closest centroid and its Euclidean distance. Ties keep the
/// lower index.
pub fn nearest_centroid(centroids: &[Centroid], point: &SparseVector) -> Option<(usize, f64)> {
    let mut nearest: Option<(usize, f64)> = None;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = centroid.distance_to(point);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((index, distance)),
        }
    }
    nearest
}

/// Greedy k-means++: each new center is the best of a few D²-weighted
/// candidates, judged by how much it lowers the total squared distance.
fn kmeans_plus_plus(
    points: &[SparseVector],
    dimensions: usize,
    clusters: usize,
    rng: &mut StdRng,
) -> Vec<Centroid> {
    if points.is_empty() {
        return Vec::new();
    }

    let local_trials = 2 + (clusters as f64).ln().floor() as usize;
    let first = rng.gen_range(0..points.len());
    let mut centroids = vec![Centroid::from_sparse(&points[first], dimensions)];
    let mut closest = squared_distances_to(points, &centroids[0]);

    while centroids.len() < clusters {
        let total = closest.iter().sum::<f64>();
        let mut best: Option<(f64, usize, Vec<f64>)> = None;

        for _ in 0..local_trials {
            let candidate_index = if total > 0.0 {
                sample_weighted(&closest, rng.gen_range(0.0..total))
            } else {
                // Every point already sits on a centroid.
                rng.gen_range(0..points.len())
            };
            let candidate = Centroid::from_sparse(&points[candidate_index], dimensions);
            let updated = squared_distances_to(points, &candidate)
                .into_iter()
                .zip(closest.iter())
                .map(|(distance, current)| distance.min(*current))
                .collect::<Vec<f64>>();
            let potential = updated.iter().sum::<f64>();

            let improves = match &best {
                Some((best_potential, _, _)) => potential < *best_potential,
                None => true,
            };
            if improves {
                best = Some((potential, candidate_index, updated));
            }
        }

        let Some((_, chosen, updated)) = best else {
            break;
        };
        centroids.push(Centroid::from_sparse(&points[chosen], dimensions));
        closest = updated;
    }

    centroids
}

fn squared_distances_to(points: &[SparseVector], centroid: &Centroid) -> Vec<f64> {
    points
        .iter()
        .map(|point| point.squared_distance(&centroid.values, centroid.squared_norm))
        .collect()
}

fn sample_weighted(weights: &[f64], target: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > target {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}

fn lloyd(
    points: &[SparseVector],
    dimensions: usize,
    mut centroids: Vec<Centroid>,
    max_iterations: usize,
) -> KMeansFit {
    let mut assignments = assign(points, &centroids);
    let mut iterations = 0usize;

    while iterations < max_iterations {
        iterations += 1;
        centroids = recompute_centroids(points, &assignments, &centroids, dimensions);
        let next = assign(points, &centroids);
        if next == assignments {
            break;
        }
        assignments = next;
    }

    let inertia = points
        .iter()
        .zip(assignments.iter())
        .map(|(point, cluster)| {
            let centroid = &centroids[*cluster];
            point.squared_distance(&centroid.values, centroid.squared_norm)
        })
        .sum();

    KMeansFit {
        centroids,
        assignments,
        inertia,
        iterations,
    }
}

fn assign(points: &[SparseVector], centroids: &[Centroid]) -> Vec<usize> {
    points
        .iter()
        .map(|point| {
            nearest_centroid(centroids, point)
                .map(|(index, _)| index)
                .unwrap_or(0)
        })
        .collect()
}

fn recompute_centroids(
    points: &[SparseVector],
    assignments: &[usize],
    previous: &[Centroid],
    dimensions: usize,
) -> Vec<Centroid> {
    let mut sums = vec![vec![0.0; dimensions]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (point, cluster) in points.iter().zip(assignments.iter()) {
        counts[*cluster] += 1;
        for (index, value) in point.entries() {
            sums[*cluster][*index] += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .enumerate()
        .map(|(cluster, (sum, count))| {
            if count == 0 {
                // An emptied cluster stays where it was.
                return previous[cluster].clone();
            }
            let size = count as f64;
            Centroid::from_values(sum.into_iter().map(|value| value / size).collect())
        })
        .collect()
}
