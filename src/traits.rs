//! Collaborator seams for the dispatcher.
//!
//! These are intentionally minimal. Address resolution and clustering are
//! swapped out in tests and by the CLI (HTTP geocoder vs. lookup table).

use crate::error::{ClusteringError, ResolveError};
use crate::kmeans::Cluster;
use crate::model::{Coordinate, OrderId};

/// Turns a free-text address into coordinates.
pub trait CoordinateResolver: Send + Sync {
    fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError>;
}

impl<T> CoordinateResolver for &T
where
    T: CoordinateResolver + ?Sized,
{
    fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        (**self).resolve(address)
    }
}

impl<T> CoordinateResolver for Box<T>
where
    T: CoordinateResolver + ?Sized,
{
    fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        (**self).resolve(address)
    }
}

/// Splits id-tagged points into `k` spatial groups.
///
/// The returned vector is indexed by cluster; clusters may be empty.
pub trait Partitioner {
    fn partition(&self, points: &[(OrderId, Coordinate)], k: usize) -> Result<Vec<Cluster>, ClusteringError>;
}

impl<T> Partitioner for &T
where
    T: Partitioner + ?Sized,
{
    fn partition(&self, points: &[(OrderId, Coordinate)], k: usize) -> Result<Vec<Cluster>, ClusteringError> {
        (**self).partition(points, k)
    }
}
