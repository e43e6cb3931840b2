//! Record schemas for the reservation backend's payloads.
//!
//! Fallback literals are the ones the web client displayed when the backend
//! left a field out.

use json_ref_graph::{RecordSchema, ValueKind};

pub fn user() -> RecordSchema {
    RecordSchema::new("User")
        .require("id", ValueKind::Number)
        .require("fullName", ValueKind::String)
        .integer("id")
        .text("fullName", "Unknown User")
        .text("email", "N/A")
        .text("role", "User")
}

/// Route of a bus. Only ever seen nested under a bus.
pub fn route() -> RecordSchema {
    RecordSchema::new("Route")
        .integer("id")
        .text("origin", "Unknown")
        .text("destination", "Unknown")
        .text("departureTime", "")
        .text("arrivalTime", "")
        .number("fare")
}

pub fn seat() -> RecordSchema {
    RecordSchema::new("Seat")
        .integer("id")
        .integer("busId")
        .text("seatNumber", "N/A")
        .flag("isBooked")
}

pub fn amenity() -> RecordSchema {
    RecordSchema::new("Amenity")
        .require("id", ValueKind::Number)
        .require("name", ValueKind::String)
        .integer("id")
        .text("name", "Unknown")
}

pub fn bus() -> RecordSchema {
    RecordSchema::new("Bus")
        .require("id", ValueKind::Number)
        .require("busName", ValueKind::String)
        .integer("id")
        .text("busName", "Unknown Bus")
        .text("busNumber", "N/A")
        .text("busType", "N/A")
        .integer("totalSeats")
        .integer("routeId")
        .integer("busOperatorId")
        .record("route", route())
        .collection("seats", seat())
}

pub fn booking() -> RecordSchema {
    RecordSchema::new("Booking")
        .require("id", ValueKind::Number)
        .require("userId", ValueKind::Number)
        .require("busId", ValueKind::Number)
        .integer("id")
        .integer("userId")
        .integer("busId")
        .list("seatNumbers", "N/A")
        .timestamp("bookingDate")
        .number("totalAmount")
        .text("status", "Unknown")
        .record("user", user())
        .record("bus", bus())
}

#[cfg(test)]
mod tests {
    use super::*;
    use json_ref_graph::Markers;
    use serde_json::json;

    #[test]
    fn schemas_are_valid() {
        for schema in [user(), route(), seat(), amenity(), bus(), booking()] {
            assert!(schema.validate().is_ok(), "{}", schema.name());
        }
    }

    #[test]
    fn predicates_do_not_overlap_on_typical_payloads() {
        let m = Markers::default();
        let booking_node = json!({"id": 1, "userId": 2, "busId": 3, "seatNumbers": "A1"});
        let bus_node = json!({"id": 3, "busName": "Volvo", "busNumber": "KA-01"});
        let user_node = json!({"id": 2, "fullName": "Asha", "email": "a@x.in"});
        let seat_node = json!({"id": 9, "busId": 3, "seatNumber": "A1", "isBooked": true});

        assert!(booking().matches(&booking_node, &m));
        assert!(!booking().matches(&seat_node, &m));
        assert!(bus().matches(&bus_node, &m));
        assert!(!bus().matches(&booking_node, &m));
        assert!(user().matches(&user_node, &m));
        assert!(!user().matches(&bus_node, &m));
        assert!(!amenity().matches(&bus_node, &m));
        assert!(!route().matches(&json!({"origin": "Pune"}), &m));
    }
}
