//! Data models shared by commands and services
//!
//! Each model is a plain data type: rate observations, indicator metadata,
//! chart configuration and the conversion form.

pub mod chart;
pub mod conversion;
pub mod indicator;
pub mod rate;

pub use chart::{LineChartConfig, Rgb};
pub use conversion::ConversionForm;
pub use indicator::{Indicator, KNOWN_INDICATORS};
pub use rate::RateEntry;
