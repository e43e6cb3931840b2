//! bus-booking: reservation records from the booking backend's payloads.
//!
//! The backend serializes bookings, buses, users and amenities with
//! reference preservation, so the same bus or user shows up once in full and
//! elsewhere as `{"$ref": "..."}`. The extractors here resolve those payloads
//! with [`json_ref_graph`] and return typed records.
//!
//! ```
//! let payload = r#"{"$id":"1","$values":[
//!     {"$id":"2","id":11,"userId":4,"busId":7,"seatNumbers":"A1,A2","totalAmount":900,
//!      "status":"Booked","bookingDate":"2025-05-10T08:00:00",
//!      "bus":{"$id":"3","id":7,"busName":"Sea Breeze","busNumber":"KL-07"}},
//!     {"$id":"4","id":12,"userId":4,"busId":7,"bus":{"$ref":"3"}}
//! ]}"#;
//!
//! let bookings = bus_booking::parse_bookings(payload).unwrap();
//! assert_eq!(bookings.len(), 2);
//! assert_eq!(bookings[0].seats(), vec!["A1", "A2"]);
//! assert_eq!(bookings[1].status, "Unknown");
//! assert_eq!(bookings[1].bus.as_ref().unwrap().bus_name, "Sea Breeze");
//! ```

mod booking;
mod bus;
mod error;
mod extract;
mod model;
pub mod schema;

pub use booking::{
    filter_by_status, parse_timestamp, sort_by_booking_date_desc, BookingStats, BookingStatus,
    StatusFilter,
};
pub use bus::{amenity_ids, average_occupancy};
pub use error::BookingError;
pub use extract::{
    extract_amenities, extract_bookings, extract_buses, extract_users, parse_amenities,
    parse_bookings, parse_buses, parse_users, Extracted, Extractor,
};
pub use model::{Amenity, Booking, Bus, Route, Seat, User};
