use thiserror::Error;

use crate::models::RateEntry;

#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("No rate data available")]
    EmptySeries,

    #[error("Invalid rate {0}: cannot divide by it")]
    InvalidRate(f64),
}

/// Round to two decimal places, half away from zero
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Convert `amount` with the first rate of `series`.
///
/// The first element is taken as the applicable rate, so callers slice the
/// series to the window they want before calling. Negative rates (a month
/// of deflation on `ipc`, for one) divide like any other.
pub fn convert_amount(amount: f64, series: &[RateEntry]) -> Result<f64, ConversionError> {
    let rate = series.first().ok_or(ConversionError::EmptySeries)?.value;
    if rate == 0.0 || !rate.is_finite() {
        return Err(ConversionError::InvalidRate(rate));
    }
    Ok(round2(amount / rate))
}

/// Result line shown to the user; `None` means there was nothing to convert
pub fn format_result(total: Option<f64>) -> String {
    match total {
        // Normalise -0 so a zero amount never prints as "-0"
        Some(total) if total == 0.0 => "Resultado: 0".to_string(),
        Some(total) => format!("Resultado: {}", total),
        None => "Resultado: $0".to_string(),
    }
}
