//! Dispatch entry point: validate, resolve addresses, assemble routes.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::assembler::{assemble, ensure_unique_drivers, AssembleOptions};
use crate::error::{DispatchError, InputError, ResolveError};
use crate::model::{Coordinate, DispatchPlan, Hub, Order};
use crate::traits::{CoordinateResolver, Partitioner};

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub assemble: AssembleOptions,
    /// Concurrent address lookups. 1 resolves sequentially and stops at the
    /// first failure.
    pub resolve_workers: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            assemble: AssembleOptions::default(),
            resolve_workers: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher<R, P> {
    resolver: R,
    partitioner: P,
    options: DispatchOptions,
}

impl<R, P> Dispatcher<R, P>
where
    R: CoordinateResolver,
    P: Partitioner,
{
    pub fn new(resolver: R, partitioner: P) -> Self {
        Self::with_options(resolver, partitioner, DispatchOptions::default())
    }

    pub fn with_options(resolver: R, partitioner: P, options: DispatchOptions) -> Self {
        Self {
            resolver,
            partitioner,
            options,
        }
    }

    /// Assigns the given addresses to drivers.
    ///
    /// The hub is resolved first, then every order address in input order.
    /// Any failed lookup aborts the whole call. Orders get ids `1..=n` in
    /// input order regardless of how lookups were scheduled.
    pub fn dispatch(
        &self,
        addresses: &[String],
        drivers: &[String],
        hub_address: &str,
    ) -> Result<DispatchPlan, DispatchError> {
        if addresses.is_empty() {
            return Err(InputError::NoOrders.into());
        }
        if drivers.is_empty() {
            return Err(InputError::NoDrivers.into());
        }
        ensure_unique_drivers(drivers)?;

        let hub_location = self
            .resolver
            .resolve(hub_address)
            .map_err(|source| DispatchError::resolution(hub_address, source))?;
        let hub = Hub::with_address(hub_address, hub_location);
        debug!(address = hub_address, lat = hub_location.lat, lon = hub_location.lon, "resolved hub");

        let orders = self.resolve_orders(addresses)?;
        info!(orders = orders.len(), drivers = drivers.len(), "resolved all order addresses");

        assemble(&orders, drivers, &hub, &self.partitioner, &self.options.assemble)
    }

    /// Resolves each address into an [`Order`] with a 1-based id.
    pub fn resolve_orders(&self, addresses: &[String]) -> Result<Vec<Order>, DispatchError> {
        let locations = if self.options.resolve_workers > 1 {
            self.resolve_parallel(addresses, self.options.resolve_workers)?
        } else {
            self.resolve_sequential(addresses)?
        };

        Ok(addresses
            .iter()
            .zip(locations)
            .enumerate()
            .map(|(index, (address, location))| Order::new(index + 1, address.clone(), location))
            .collect())
    }

    fn resolve_sequential(&self, addresses: &[String]) -> Result<Vec<Coordinate>, DispatchError> {
        addresses
            .iter()
            .map(|address| self.resolve_one(address))
            .collect()
    }

    /// Looks addresses up on a bounded pool. Results are matched back to
    /// input positions, and the reported failure is the earliest failing
    /// address in input order.
    fn resolve_parallel(&self, addresses: &[String], workers: usize) -> Result<Vec<Coordinate>, DispatchError> {
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(err) => {
                warn!(error = %err, "could not start resolver pool, resolving sequentially");
                return self.resolve_sequential(addresses);
            }
        };

        let resolver = &self.resolver;
        let results: Vec<Result<Coordinate, ResolveError>> =
            pool.install(|| addresses.par_iter().map(|address| resolver.resolve(address)).collect());

        addresses
            .iter()
            .zip(results)
            .map(|(address, result)| {
                result.map_err(|source| DispatchError::resolution(address.as_str(), source))
            })
            .collect()
    }

    fn resolve_one(&self, address: &str) -> Result<Coordinate, DispatchError> {
        let location = self
            .resolver
            .resolve(address)
            .map_err(|source| DispatchError::resolution(address, source))?;
        debug!(address, lat = location.lat, lon = location.lon, "resolved address");
        Ok(location)
    }
}
