//! route-dispatch core
//!
//! Splits delivery orders into spatial clusters with k-means, orders each
//! cluster by distance to a hub and binds clusters to drivers.

pub mod assembler;
pub mod dispatcher;
pub mod error;
pub mod geocoder;
pub mod ingest;
pub mod kmeans;
pub mod model;
pub mod report;
pub mod resolver;
pub mod traits;
