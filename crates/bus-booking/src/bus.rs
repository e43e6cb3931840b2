use crate::model::{Amenity, Bus};

impl Bus {
    pub fn booked_seats(&self) -> usize {
        self.seats.iter().filter(|s| s.is_booked).count()
    }

    pub fn available_seats(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_booked).count()
    }

    /// Booked share of `total_seats`, rounded to a whole percent. Zero when
    /// the bus reports no capacity.
    pub fn occupancy_percent(&self) -> u32 {
        if self.total_seats <= 0 {
            return 0;
        }
        (self.booked_seats() as f64 * 100.0 / self.total_seats as f64).round() as u32
    }

    /// `"origin → destination"`, using the route placeholders when the bus
    /// carries no route.
    pub fn route_label(&self) -> String {
        match &self.route {
            Some(route) => format!("{} → {}", route.origin, route.destination),
            None => "Unknown → Unknown".to_string(),
        }
    }
}

/// Mean occupancy across a fleet, `0.0` for an empty one.
pub fn average_occupancy(buses: &[Bus]) -> f64 {
    if buses.is_empty() {
        return 0.0;
    }
    let sum: u32 = buses.iter().map(Bus::occupancy_percent).sum();
    f64::from(sum) / buses.len() as f64
}

pub fn amenity_ids(amenities: &[Amenity]) -> Vec<i64> {
    amenities.iter().map(|a| a.id).collect()
}
