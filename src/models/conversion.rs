//! Conversion request models

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Invalid amount '{0}': enter a number")]
    InvalidAmount(String),

    #[error("Choose a currency (see `list`)")]
    MissingDivisa,

    #[error("Invalid currency code '{0}'")]
    InvalidDivisa(String),
}

/// The two fields of a conversion submission
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionForm {
    pub value: f64,
    pub divisa: String,
}

impl ConversionForm {
    /// Extract the raw `value` and `divisa` fields.
    ///
    /// An empty amount counts as zero. The currency code is lower-cased and
    /// may only contain ASCII letters, digits and underscores since it ends
    /// up as a URL path segment.
    pub fn from_fields(value: &str, divisa: &str) -> Result<Self, FormError> {
        let raw_value = value.trim();
        let value = if raw_value.is_empty() {
            0.0
        } else {
            raw_value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| FormError::InvalidAmount(raw_value.to_string()))?
        };

        let divisa = divisa.trim().to_lowercase();
        if divisa.is_empty() {
            return Err(FormError::MissingDivisa);
        }
        if !divisa.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FormError::InvalidDivisa(divisa));
        }

        Ok(Self { value, divisa })
    }
}
