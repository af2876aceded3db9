//! Error taxonomy for dispatching.

use thiserror::Error;

use crate::model::OrderId;

/// Caller mistakes detected before any work is done.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no addresses provided")]
    NoOrders,
    #[error("no drivers provided")]
    NoDrivers,
    #[error("driver '{0}' listed more than once")]
    DuplicateDriver(String),
    #[error("order id {0} used more than once")]
    DuplicateOrderId(OrderId),
}

/// Failure of the k-means partitioning step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClusteringError {
    #[error("cluster count must be positive")]
    NoClusters,
    #[error("cannot form {k} clusters from {points} points")]
    TooManyClusters { k: usize, points: usize },
    #[error("cannot separate {k} clusters: only {distinct} distinct coordinates")]
    Degenerate { k: usize, distinct: usize },
}

/// Failure to turn an address into coordinates.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder responded with status code {0}")]
    Status(u16),
    #[error("geocoder rejected the request ({status}): {message}")]
    Rejected { status: String, message: String },
    #[error("no results found")]
    NoResults,
    #[error("address is not in the lookup table")]
    Unknown,
}

/// Failure reading address, driver or location lists.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open CSV file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to resolve '{address}': {source}")]
    Resolution {
        address: String,
        #[source]
        source: ResolveError,
    },
    #[error("error executing k-means algorithm: {0}")]
    Clustering(#[from] ClusteringError),
    /// More clusters were planned than there are drivers to take them.
    #[error("{clusters} clusters cannot be bound to {drivers} drivers")]
    Assignment { clusters: usize, drivers: usize },
    #[error("clustering returned unknown order id {id}")]
    UnknownOrder { id: OrderId },
}

impl DispatchError {
    pub fn resolution(address: impl Into<String>, source: ResolveError) -> Self {
        DispatchError::Resolution {
            address: address.into(),
            source,
        }
    }
}
