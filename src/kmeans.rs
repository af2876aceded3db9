//! Lloyd's k-means over planar (lat, lon) coordinates.
//!
//! Distances are squared Euclidean in degree space. That is only a fair
//! approximation over city-sized areas, which is all dispatching needs.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::error::ClusteringError;
use crate::model::{Coordinate, OrderId};
use crate::traits::Partitioner;

/// Iteration bound used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Seed for centroid initialization. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Upper bound on assign/update rounds.
    pub max_iterations: usize,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// One group produced by a partitioning run.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: Coordinate,
    /// Member ids in the order the points were supplied.
    pub members: Vec<OrderId>,
}

#[derive(Debug, Clone, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Deterministic engine with the default iteration bound.
    pub fn seeded(seed: u64) -> Self {
        Self::new(KMeansConfig {
            seed: Some(seed),
            ..KMeansConfig::default()
        })
    }

    /// Picks `k` distinct point coordinates as starting centroids.
    ///
    /// Seeds are drawn among distinct coordinates so that no two clusters
    /// start on top of each other. Cluster indices follow the input order of
    /// the chosen seeds.
    fn initial_centroids(&self, points: &[(OrderId, Coordinate)], k: usize) -> Result<Vec<Coordinate>, ClusteringError> {
        let distinct = distinct_coordinates(points);
        if distinct.len() < k {
            return Err(ClusteringError::Degenerate {
                k,
                distinct: distinct.len(),
            });
        }

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut picked = index::sample(&mut rng, distinct.len(), k).into_vec();
        picked.sort_unstable();

        Ok(picked.into_iter().map(|i| distinct[i]).collect())
    }
}

impl Partitioner for KMeans {
    fn partition(&self, points: &[(OrderId, Coordinate)], k: usize) -> Result<Vec<Cluster>, ClusteringError> {
        if k == 0 {
            return Err(ClusteringError::NoClusters);
        }
        if k > points.len() {
            return Err(ClusteringError::TooManyClusters { k, points: points.len() });
        }

        let mut centroids = self.initial_centroids(points, k)?;
        let mut assignments = vec![usize::MAX; points.len()];
        let max_iterations = self.config.max_iterations.max(1);

        let mut converged = false;
        for iteration in 0..max_iterations {
            let changed = assign_points(points, &centroids, &mut assignments);
            if changed == 0 {
                debug!(iteration, k, points = points.len(), "k-means converged");
                converged = true;
                break;
            }
            update_centroids(points, &assignments, &mut centroids);
        }

        if !converged {
            warn!(max_iterations, k, "k-means stopped at iteration bound before converging");
        }

        Ok(build_clusters(points, &assignments, centroids))
    }
}

/// Index of the nearest centroid. Ties go to the lowest index.
pub fn nearest_centroid(point: &Coordinate, centroids: &[Coordinate]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let distance = point.squared_distance(centroid);
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}

/// Reassigns every point, returning how many changed cluster.
fn assign_points(points: &[(OrderId, Coordinate)], centroids: &[Coordinate], assignments: &mut [usize]) -> usize {
    let mut changed = 0;
    for ((_, point), assigned) in points.iter().zip(assignments.iter_mut()) {
        let nearest = nearest_centroid(point, centroids);
        if *assigned != nearest {
            *assigned = nearest;
            changed += 1;
        }
    }
    changed
}

/// Moves each centroid to the mean of its members. Empty clusters keep
/// their previous centroid.
fn update_centroids(points: &[(OrderId, Coordinate)], assignments: &[usize], centroids: &mut [Coordinate]) {
    let mut sums = vec![(0.0f64, 0.0f64); centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for ((_, point), &cluster) in points.iter().zip(assignments) {
        sums[cluster].0 += point.lat;
        sums[cluster].1 += point.lon;
        counts[cluster] += 1;
    }

    for ((centroid, (lat, lon)), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count > 0 {
            *centroid = Coordinate::new(lat / count as f64, lon / count as f64);
        }
    }
}

fn build_clusters(points: &[(OrderId, Coordinate)], assignments: &[usize], centroids: Vec<Coordinate>) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = centroids
        .into_iter()
        .map(|centroid| Cluster {
            centroid,
            members: Vec::new(),
        })
        .collect();

    for ((id, _), &cluster) in points.iter().zip(assignments) {
        clusters[cluster].members.push(*id);
    }

    clusters
}

/// Distinct by value: `-0.0` and `0.0` are the same coordinate.
fn distinct_coordinates(points: &[(OrderId, Coordinate)]) -> Vec<Coordinate> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for (_, point) in points {
        if seen.insert(((point.lat + 0.0).to_bits(), (point.lon + 0.0).to_bits())) {
            unique.push(*point);
        }
    }
    unique
}
