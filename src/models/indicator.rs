//! Indicator models

use super::RateEntry;

/// Indicator codes published by mindicador.cl: (code, name, unit)
pub const KNOWN_INDICATORS: &[(&str, &str, &str)] = &[
    ("dolar", "Dólar observado", "Pesos"),
    ("dolar_intercambio", "Dólar acuerdo", "Pesos"),
    ("euro", "Euro", "Pesos"),
    ("uf", "Unidad de fomento (UF)", "Pesos"),
    ("utm", "Unidad Tributaria Mensual (UTM)", "Pesos"),
    ("ivp", "Indice de valor promedio (IVP)", "Pesos"),
    ("ipc", "Indice de Precios al Consumidor (IPC)", "Porcentaje"),
    ("imacec", "Imacec", "Porcentaje"),
    ("tpm", "Tasa Política Monetaria (TPM)", "Porcentaje"),
    ("libra_cobre", "Libra de Cobre", "Dólar"),
    ("tasa_desempleo", "Tasa de desempleo", "Porcentaje"),
    ("bitcoin", "Bitcoin", "Dólar"),
];

/// Look up the display name of a known indicator code
pub fn known_name(code: &str) -> Option<&'static str> {
    KNOWN_INDICATORS
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name, _)| *name)
}

/// An indicator as returned by the API, with its series decoded.
///
/// `serie` is `None` when the response body carried no series at all,
/// which callers treat the same as an empty one.
#[derive(Debug, Clone)]
pub struct Indicator {
    pub codigo: String,
    pub nombre: Option<String>,
    pub unidad_medida: Option<String>,
    pub serie: Option<Vec<RateEntry>>,
}

impl Indicator {
    /// Caption for charts: the API's name, falling back to the known name or the code
    pub fn caption(&self) -> String {
        self.nombre
            .clone()
            .or_else(|| known_name(&self.codigo).map(str::to_string))
            .unwrap_or_else(|| self.codigo.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_name_is_case_insensitive() {
        assert_eq!(known_name("DOLAR"), Some("Dólar observado"));
        assert_eq!(known_name("peso"), None);
    }

    #[test]
    fn test_caption_fallbacks() {
        let mut indicator = Indicator {
            codigo: "euro".to_string(),
            nombre: Some("Euro (API)".to_string()),
            unidad_medida: None,
            serie: None,
        };
        assert_eq!(indicator.caption(), "Euro (API)");

        indicator.nombre = None;
        assert_eq!(indicator.caption(), "Euro");

        indicator.codigo = "xyz".to_string();
        assert_eq!(indicator.caption(), "xyz");
    }
}
