use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::api::mindicador::{ApiError, IndicatorResponse, MindicadorClient};
use crate::models::{Indicator, RateEntry};

/// Parse an API `fecha` into a UTC timestamp.
///
/// Accepts RFC 3339 (`2024-05-10T04:00:00.000Z`), a naive date-time
/// (`2024-05-10T04:00:00` or `2024-05-10 04:00:00`, taken as UTC) or a bare
/// date (`2024-05-10`, midnight UTC).
pub fn parse_fecha(fecha: &str) -> Result<DateTime<Utc>, String> {
    let fecha = fecha.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(fecha) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(fecha, format) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }

    NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
        .ok_or_else(|| format!("Unrecognised date '{}'", fecha))
}

/// Decode a raw response into an [`Indicator`], keeping the API's ordering
pub fn decode_indicator(divisa: &str, response: IndicatorResponse) -> Result<Indicator, ApiError> {
    let serie = match response.serie {
        Some(entries) => {
            let mut decoded = Vec::with_capacity(entries.len());
            for entry in entries {
                let date = parse_fecha(&entry.fecha).map_err(ApiError::DeserializationError)?;
                decoded.push(RateEntry::new(date, entry.valor));
            }
            Some(decoded)
        }
        None => {
            debug!("Response for {} has no serie field", divisa);
            None
        }
    };

    Ok(Indicator {
        codigo: response.codigo.unwrap_or_else(|| divisa.to_string()),
        nombre: response.nombre,
        unidad_medida: response.unidad_medida,
        serie,
    })
}

/// Fetch an indicator and decode its series
pub async fn fetch_indicator(client: &MindicadorClient, divisa: &str) -> Result<Indicator, ApiError> {
    let response = client.get_indicator(divisa).await?;
    let indicator = decode_indicator(divisa, response)?;

    info!(
        "Fetched {} ({} entries)",
        indicator.codigo,
        indicator.serie.as_ref().map_or(0, Vec::len)
    );

    Ok(indicator)
}
