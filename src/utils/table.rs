/// A simple text table for terminal output.
///
/// Widths are measured in characters, not bytes, so accented labels
/// ("Código", "Dólar") line up.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

fn width(s: &str) -> usize {
    s.chars().count()
}

impl Table {
    /// Create a new table with the given headers
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let col_widths = headers.iter().map(|h| width(h)).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row; cells beyond the header count are dropped
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|s| s.as_ref().to_string())
            .collect();

        for (i, col) in row.iter().enumerate() {
            self.col_widths[i] = self.col_widths[i].max(width(col));
        }

        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = self
            .col_widths
            .iter()
            .enumerate()
            .map(|(i, &col_width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = col_width.saturating_sub(width(cell));
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["Fecha", "Pesos"]);
        table.add_row(&["5/10/2024", "935.50"]);
        table.add_row(&["5/9/2024", "940.10"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Fecha     | Pesos");
        assert_eq!(lines[1], "----------+-------");
        assert_eq!(lines[2], "5/10/2024 | 935.50");
        assert_eq!(lines[3], "5/9/2024  | 940.10");
    }

    #[test]
    fn test_accented_headers_align() {
        let mut table = Table::new(&["Código", "Unidad"]);
        table.add_row(&["uf", "Pesos"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Código | Unidad");
        assert_eq!(lines[2], "uf     | Pesos");
    }

    #[test]
    fn test_short_and_long_rows() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(&["x"]);
        table.add_row(&["1", "2", "3"]);

        let rendered = table.render();
        assert!(rendered.lines().any(|l| l == "x |"));
        assert!(!rendered.contains('3'));
    }
}
