//! SQLite helper utilities for ids and timestamps
//!
//! SQLite has no native UUID or timestamp type; ids are stored as UUID
//! strings and timestamps as RFC 3339 text.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new primary key
#[inline]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Get current UTC timestamp as ISO8601 string for SQLite
#[inline]
pub fn now_iso8601() -> String {
    datetime_to_str(Utc::now())
}

/// Convert a chrono DateTime to ISO8601 string
#[inline]
pub fn datetime_to_str(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Round a money amount to cents
#[inline]
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
