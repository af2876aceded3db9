//! Cleveland, OH locations for dispatch fixtures.
//!
//! Three neighborhoods a few kilometers apart. Within a neighborhood stops
//! are a few hundred meters apart, so two-way splits are unambiguous.

/// A named address with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub address: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(address: &'static str, lat: f64, lon: f64) -> Self {
        Self { address, lat, lon }
    }

    pub fn coords(&self) -> route_dispatch::model::Coordinate {
        route_dispatch::model::Coordinate::new(self.lat, self.lon)
    }
}

pub const HUB: Location = Location::new("2800 Euclid Ave, Cleveland, OH", 41.502069, -81.669011);

// ============================================================================
// Downtown
// ============================================================================

pub const DOWNTOWN: &[Location] = &[
    Location::new("123 Main St, Cleveland, OH", 41.4993, -81.6944),
    Location::new("1 Public Sq, Cleveland, OH", 41.5008, -81.6901),
    Location::new("2014 E 9th St, Cleveland, OH", 41.4965, -81.6880),
    Location::new("1100 W 9th St, Cleveland, OH", 41.5030, -81.6953),
];

// ============================================================================
// University Circle
// ============================================================================

pub const UNIVERSITY_CIRCLE: &[Location] = &[
    Location::new("11150 East Blvd, Cleveland, OH", 41.5079, -81.6118),
    Location::new("12018 Mayfield Rd, Cleveland, OH", 41.5097, -81.5968),
    Location::new("10900 Euclid Ave, Cleveland, OH", 41.5045, -81.6085),
    Location::new("11400 Bellflower Rd, Cleveland, OH", 41.5113, -81.6050),
];

// ============================================================================
// West Side
// ============================================================================

pub const WEST_SIDE: &[Location] = &[
    Location::new("1979 W 25th St, Cleveland, OH", 41.4845, -81.7036),
    Location::new("6415 Detroit Ave, Cleveland, OH", 41.4853, -81.7340),
    Location::new("5800 Lorain Ave, Cleveland, OH", 41.4790, -81.7250),
    Location::new("4500 Lorain Ave, Cleveland, OH", 41.4868, -81.7160),
];
