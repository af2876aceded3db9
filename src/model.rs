//! Dispatch data model: orders, hub, routes and the final plan.

use serde::{Deserialize, Serialize};

/// Identifier assigned to an order at ingestion (1-based, input order).
pub type OrderId = usize;

/// A (latitude, longitude) pair in degrees.
///
/// No range validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Squared planar distance in (lat, lon) space.
    ///
    /// Used for every comparison in clustering and stop ordering; the
    /// square root is never needed because only the ordering matters.
    pub fn squared_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// A delivery order with its resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub address: String,
    pub location: Coordinate,
}

impl Order {
    pub fn new(id: OrderId, address: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id,
            address: address.into(),
            location,
        }
    }
}

/// The dispatch hub. Stops within a route are ordered by proximity to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub address: Option<String>,
    pub location: Coordinate,
}

impl Hub {
    pub fn new(location: Coordinate) -> Self {
        Self {
            address: None,
            location,
        }
    }

    pub fn with_address(address: impl Into<String>, location: Coordinate) -> Self {
        Self {
            address: Some(address.into()),
            location,
        }
    }
}

/// Ordered stops assigned to one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub driver: String,
    pub stops: Vec<Order>,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn order_ids(&self) -> Vec<OrderId> {
        self.stops.iter().map(|order| order.id).collect()
    }
}

/// Why an order did not make it into any route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The order's cluster held more stops than the route capacity and this
    /// stop was among the farthest from the hub.
    OverCapacity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedOrder {
    pub order: Order,
    pub driver: String,
    pub reason: DropReason,
}

/// Result of one dispatch: a route per driver, in driver input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub hub: Hub,
    pub routes: Vec<Route>,
    pub dropped: Vec<DroppedOrder>,
}

impl DispatchPlan {
    /// Route for the given driver name.
    pub fn route_for(&self, driver: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.driver == driver)
    }

    /// Routes that received at least one stop.
    pub fn non_empty_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    /// All routed order ids, route by route.
    pub fn assigned_ids(&self) -> Vec<OrderId> {
        self.routes.iter().flat_map(|route| route.order_ids()).collect()
    }
}
