//! Test fixtures for route-dispatch.
//!
//! Provides:
//! - Cleveland neighborhood locations grouped by area
//! - Resolvers that fail on chosen addresses

pub mod cleveland_locations;

pub use cleveland_locations::*;

use std::collections::HashSet;

use route_dispatch::error::ResolveError;
use route_dispatch::model::Coordinate;
use route_dispatch::resolver::StaticResolver;
use route_dispatch::traits::CoordinateResolver;

/// Lookup table holding the hub and every fixture location.
pub fn cleveland_resolver() -> StaticResolver {
    std::iter::once(&HUB)
        .chain(DOWNTOWN)
        .chain(UNIVERSITY_CIRCLE)
        .chain(WEST_SIDE)
        .map(|location| (location.address, location.coords()))
        .collect()
}

pub fn addresses(locations: &[&Location]) -> Vec<String> {
    locations.iter().map(|location| location.address.to_string()).collect()
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Delegates to a table but fails for the listed addresses.
pub struct FailingResolver {
    pub inner: StaticResolver,
    pub failing: HashSet<String>,
}

impl FailingResolver {
    pub fn new(inner: StaticResolver, failing: &[&str]) -> Self {
        Self {
            inner,
            failing: failing.iter().map(|address| address.to_string()).collect(),
        }
    }
}

impl CoordinateResolver for FailingResolver {
    fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        if self.failing.contains(address) {
            return Err(ResolveError::Status(503));
        }
        self.inner.resolve(address)
    }
}
