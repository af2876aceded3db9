//! Lookup-table resolver for offline runs.

use std::collections::HashMap;

use crate::error::ResolveError;
use crate::model::Coordinate;
use crate::traits::CoordinateResolver;

/// Resolves addresses from a fixed table. Keys are matched after trimming
/// surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    table: HashMap<String, Coordinate>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: impl AsRef<str>, location: Coordinate) -> Option<Coordinate> {
        self.table.insert(address.as_ref().trim().to_string(), location)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, Coordinate)> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = (S, Coordinate)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for (address, location) in iter {
            resolver.insert(address, location);
        }
        resolver
    }
}

impl CoordinateResolver for StaticResolver {
    fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError> {
        self.table.get(address.trim()).copied().ok_or(ResolveError::Unknown)
    }
}
