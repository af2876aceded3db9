//! Route assembly: sizing, clustering, stop ordering and driver binding.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::error::{DispatchError, InputError};
use crate::model::{Coordinate, DispatchPlan, DropReason, DroppedOrder, Hub, Order, OrderId, Route};
use crate::traits::Partitioner;

/// Smallest route capacity handed out, however light the workload.
pub const BASELINE_CAPACITY: usize = 2;

/// How the cluster count and route capacity are derived from the workload.
///
/// The two knobs are kept apart so the clustering engine never needs to
/// know which policy produced its `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityPolicy {
    /// Orders per driver, `max(2, n / m)`, used both as the route capacity
    /// and as the number of clusters.
    #[default]
    OrdersPerDriver,
    /// One cluster per driver (`min(m, n)`) and no truncation.
    ClusterPerDriver,
}

/// Cluster count and route capacity for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub cluster_count: usize,
    pub route_capacity: usize,
}

impl CapacityPolicy {
    /// `drivers` must be non-zero.
    pub fn plan(&self, orders: usize, drivers: usize) -> Plan {
        match self {
            CapacityPolicy::OrdersPerDriver => {
                let capacity = orders_per_driver(orders, drivers);
                Plan {
                    cluster_count: capacity,
                    route_capacity: capacity,
                }
            }
            CapacityPolicy::ClusterPerDriver => Plan {
                cluster_count: drivers.min(orders),
                route_capacity: orders,
            },
        }
    }
}

/// `max(2, orders / drivers)` with integer division.
pub fn orders_per_driver(orders: usize, drivers: usize) -> usize {
    BASELINE_CAPACITY.max(orders / drivers)
}

#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    pub policy: CapacityPolicy,
}

/// Groups orders into clusters, orders each cluster by hub distance and
/// binds cluster `i` to `drivers[i]`.
///
/// Every driver gets a route in the result, possibly empty. Stops over the
/// route capacity are reported in `DispatchPlan::dropped`.
pub fn assemble<P>(
    orders: &[Order],
    drivers: &[String],
    hub: &Hub,
    partitioner: &P,
    options: &AssembleOptions,
) -> Result<DispatchPlan, DispatchError>
where
    P: Partitioner,
{
    if orders.is_empty() {
        return Err(InputError::NoOrders.into());
    }
    if drivers.is_empty() {
        return Err(InputError::NoDrivers.into());
    }
    ensure_unique_drivers(drivers)?;

    let by_id = index_orders(orders)?;

    let plan = options.policy.plan(orders.len(), drivers.len());
    if plan.cluster_count > drivers.len() {
        return Err(DispatchError::Assignment {
            clusters: plan.cluster_count,
            drivers: drivers.len(),
        });
    }
    debug!(
        orders = orders.len(),
        drivers = drivers.len(),
        clusters = plan.cluster_count,
        capacity = plan.route_capacity,
        "planned dispatch"
    );

    let points: Vec<(OrderId, Coordinate)> = orders.iter().map(|order| (order.id, order.location)).collect();
    let clusters = partitioner.partition(&points, plan.cluster_count)?;
    if clusters.len() > drivers.len() {
        return Err(DispatchError::Assignment {
            clusters: clusters.len(),
            drivers: drivers.len(),
        });
    }

    let mut routes = Vec::with_capacity(drivers.len());
    let mut dropped = Vec::new();

    for (index, driver) in drivers.iter().enumerate() {
        let mut stops = match clusters.get(index) {
            Some(cluster) => cluster
                .members
                .iter()
                .map(|id| {
                    by_id
                        .get(id)
                        .map(|order| (*order).clone())
                        .ok_or(DispatchError::UnknownOrder { id: *id })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        sort_by_hub_distance(&mut stops, &hub.location);

        if stops.len() > plan.route_capacity {
            let over = stops.split_off(plan.route_capacity);
            warn!(
                driver = driver.as_str(),
                capacity = plan.route_capacity,
                dropped = over.len(),
                "route over capacity, dropping farthest stops"
            );
            dropped.extend(over.into_iter().map(|order| DroppedOrder {
                order,
                driver: driver.clone(),
                reason: DropReason::OverCapacity,
            }));
        }

        routes.push(Route {
            driver: driver.clone(),
            stops,
        });
    }

    info!(
        routes = routes.iter().filter(|route| !route.is_empty()).count(),
        dropped = dropped.len(),
        "assembled routes"
    );

    Ok(DispatchPlan {
        hub: hub.clone(),
        routes,
        dropped,
    })
}

/// Stable ascending sort by squared distance to `hub`.
pub fn sort_by_hub_distance(stops: &mut [Order], hub: &Coordinate) {
    stops.sort_by(|a, b| {
        let da = a.location.squared_distance(hub);
        let db = b.location.squared_distance(hub);
        da.total_cmp(&db)
    });
}

pub(crate) fn ensure_unique_drivers(drivers: &[String]) -> Result<(), InputError> {
    let mut seen = HashSet::new();
    for driver in drivers {
        if !seen.insert(driver.as_str()) {
            return Err(InputError::DuplicateDriver(driver.clone()));
        }
    }
    Ok(())
}

fn index_orders(orders: &[Order]) -> Result<HashMap<OrderId, &Order>, InputError> {
    let mut by_id = HashMap::with_capacity(orders.len());
    for order in orders {
        if by_id.insert(order.id, order).is_some() {
            return Err(InputError::DuplicateOrderId(order.id));
        }
    }
    Ok(by_id)
}
