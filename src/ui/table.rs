//! Box-drawn tables for key/value and tabular output.

/// A simple table for formatted output.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Two-column "Setting / Value" table.
    pub fn key_value<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(&["Setting", "Value"]);
        for (k, v) in pairs {
            table.rows.push(vec![k.into(), v.into()]);
        }
        table
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: &[&str]) {
        self.rows.push(row.iter().map(|s| s.to_string()).collect());
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = vec![
            border(&widths, '┌', '┬', '┐'),
            line(&widths, &self.headers),
            border(&widths, '├', '┼', '┤'),
        ];
        lines.extend(self.rows.iter().map(|row| line(&widths, row)));
        lines.push(border(&widths, '└', '┴', '┘'));
        lines.join("\n")
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&mid.to_string()), right)
}

fn line(widths: &[usize], cells: &[String]) -> String {
    let mut s = String::from("│");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width - cell.chars().count();
        s.push_str(&format!(" {}{} │", cell, " ".repeat(pad)));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_renders_headers() {
        let table = Table::new(&["Setting", "Value"]);
        assert!(table.is_empty());
        let output = table.render();
        assert!(output.contains("Setting"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn key_value_table_has_one_row_per_pair() {
        let table = Table::key_value([("tenant_id", "contoso"), ("client_id", "abc")]);
        assert_eq!(table.row_count(), 2);
        let output = table.render();
        assert!(output.contains("tenant_id"));
        assert!(output.contains("contoso"));
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(&["graph", "https://graph.microsoft.com"]);
        let output = table.render();
        let widths: Vec<usize> = output.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(&["only"]);
        assert!(table.render().contains("│ only │"));
    }
}
