use crate::models::KNOWN_INDICATORS;
use crate::utils::Table;

/// Table of the indicator codes accepted by `convert`
pub fn execute() -> String {
    let mut table = Table::new(&["Código", "Indicador", "Unidad"]);
    for &(code, name, unit) in KNOWN_INDICATORS {
        table.add_row(&[code, name, unit]);
    }
    format!("💱 Available currencies and indicators\n{}", table.render())
}
