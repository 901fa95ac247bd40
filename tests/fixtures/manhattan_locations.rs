//! Real Manhattan landmarks for realistic test fixtures.

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const DOWNTOWN_MANHATTAN: Location = Location::new("Downtown Manhattan", 40.7128, -74.0060);
pub const EAST_VILLAGE: Location = Location::new("East Village", 40.7306, -73.9352);
pub const TIMES_SQUARE: Location = Location::new("Times Square", 40.7580, -73.9855);
pub const EMPIRE_STATE_BUILDING: Location = Location::new("Empire State Building", 40.7480, -73.9857);
pub const WASHINGTON_SQUARE_PARK: Location = Location::new("Washington Square Park", 40.7295, -73.9965);
pub const UNITED_NATIONS: Location = Location::new("United Nations", 40.7488, -73.9680);
pub const CARNEGIE_HALL: Location = Location::new("Carnegie Hall", 40.7614, -73.9776);
pub const GRAND_CENTRAL_TERMINAL: Location = Location::new("Grand Central Terminal", 40.7527, -73.9772);
pub const WALL_STREET: Location = Location::new("Wall Street", 40.7061, -74.0086);

/// Every landmark above.
pub fn all_locations() -> Vec<Location> {
    vec![
        DOWNTOWN_MANHATTAN,
        EAST_VILLAGE,
        TIMES_SQUARE,
        EMPIRE_STATE_BUILDING,
        WASHINGTON_SQUARE_PARK,
        UNITED_NATIONS,
        CARNEGIE_HALL,
        GRAND_CENTRAL_TERMINAL,
        WALL_STREET,
    ]
}
