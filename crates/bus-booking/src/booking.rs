//! Derived views over bookings: seats, status, statistics and ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::model::Booking;

/// Status of a booking, classified from the backend's free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Booked,
    Cancelled,
    Pending,
    Other,
}

impl BookingStatus {
    pub fn classify(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "booked" => BookingStatus::Booked,
            "cancelled" | "canceled" => BookingStatus::Cancelled,
            "pending" => BookingStatus::Pending,
            _ => BookingStatus::Other,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingStatus::Booked => "Booked",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Pending => "Pending",
            BookingStatus::Other => "Other",
        })
    }
}

impl Booking {
    /// Individual seat numbers.
    ///
    /// Accepts a comma-separated list or a JSON array literal; the `"N/A"`
    /// placeholder yields no seats.
    pub fn seats(&self) -> Vec<String> {
        let raw = self.seat_numbers.trim();
        if raw.is_empty() || raw == "N/A" {
            return Vec::new();
        }
        if raw.starts_with('[') {
            if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
                return items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.trim().to_string()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .filter(|s| !s.is_empty())
                    .collect();
            }
        }
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn seat_count(&self) -> usize {
        self.seats().len()
    }

    pub fn status_kind(&self) -> BookingStatus {
        BookingStatus::classify(&self.status)
    }

    /// Booking date as UTC, if the backend wrote a recognizable one.
    pub fn booked_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.booking_date)
    }
}

/// Parses RFC 3339 dates and the zone-less ISO form the backend emits for
/// local timestamps (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(BookingStatus),
}

pub fn filter_by_status(bookings: &[Booking], filter: StatusFilter) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => b.status_kind() == status,
        })
        .collect()
}

/// Newest first. Bookings without a parsable date go last, in input order.
pub fn sort_by_booking_date_desc(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| match (a.booked_at(), b.booked_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BookingStats {
    pub total: usize,
    pub active: usize,
    pub cancelled: usize,
    /// Sum of amounts over active bookings.
    pub revenue: f64,
}

impl BookingStats {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        bookings.iter().fold(
            BookingStats {
                total: bookings.len(),
                ..Default::default()
            },
            |mut stats, booking| {
                match booking.status_kind() {
                    BookingStatus::Booked => {
                        stats.active += 1;
                        stats.revenue += booking.total_amount;
                    }
                    BookingStatus::Cancelled => stats.cancelled += 1,
                    _ => {}
                }
                stats
            },
        )
    }
}
