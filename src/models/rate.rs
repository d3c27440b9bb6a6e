//! Rate series models

use chrono::{DateTime, Utc};

/// A single dated observation from an indicator series
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl RateEntry {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }
}
