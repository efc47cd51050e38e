//! Benchmark result tables.
//!
//! Parses the markdown table BenchmarkDotNet prints, lets individual
//! cells be underlined for emphasis and renders the table as HTML.

/// One cell of a benchmark table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkCell {
    pub value: String,
    pub column_name: String,
    pub is_underlined: bool,
    pub is_method: bool,
}

impl BenchmarkCell {
    pub fn new(value: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            column_name: column_name.into(),
            is_underlined: false,
            is_method: false,
        }
    }

    /// Cell content as HTML, wrapped in `<u>` when underlined.
    pub fn render(&self) -> String {
        match (self.is_underlined, self.is_method) {
            (true, true) => format!(r#"<u class="method">{}</u>"#, self.value),
            (true, false) => format!("<u>{}</u>", self.value),
            (false, _) => self.value.clone(),
        }
    }
}

/// One row of a benchmark table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkRow {
    pub cells: Vec<BenchmarkCell>,
}

impl BenchmarkRow {
    /// Cell in the column named `header`.
    pub fn cell(&self, header: &str) -> Option<&BenchmarkCell> {
        self.cells.iter().find(|cell| cell.column_name == header)
    }

    pub fn cell_mut(&mut self, header: &str) -> Option<&mut BenchmarkCell> {
        self.cells.iter_mut().find(|cell| cell.column_name == header)
    }

    /// Cells ordered as in `headers`; cells of unknown columns are dropped.
    pub fn sorted_cells<'a>(&'a self, headers: &'a [String]) -> impl Iterator<Item = &'a BenchmarkCell> {
        headers.iter().filter_map(|header| self.cell(header))
    }
}

/// A parsed benchmark table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkTable {
    pub headers: Vec<String>,
    pub rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    /// Flips the underline flag of the cell at `row`, `column`.
    ///
    /// Returns the new state, or `None` if the position is out of range.
    pub fn toggle_underline(&mut self, row: usize, column: usize) -> Option<bool> {
        let header = self.headers.get(column)?;
        let cell = self.rows.get_mut(row)?.cell_mut(header)?;
        cell.is_underlined = !cell.is_underlined;
        Some(cell.is_underlined)
    }
}

/// Errors from [`parse_benchmark_table`].
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    #[error("No benchmark table found")]
    NoTable,

    #[error("Row {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Parses a BenchmarkDotNet markdown table.
///
/// Only `|`-framed lines are read. The first is the header row, rows
/// made only of `-`, `:` and spaces are separators, and the first column
/// holds the method name.
pub fn parse_benchmark_table(content: &str) -> Result<BenchmarkTable, BenchmarkError> {
    let lines: Vec<(usize, String)> = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim().replace('Â', "")))
        .filter(|(_, line)| line.starts_with('|') && line.ends_with('|') && line.len() > 1)
        .filter(|(_, line)| !is_separator(line))
        .collect();

    let ((_, header_line), body) = lines.split_first().ok_or(BenchmarkError::NoTable)?;
    let headers = split_row(header_line);

    let mut rows = Vec::with_capacity(body.len());
    for (line, text) in body {
        let values = split_row(text);
        if values.len() != headers.len() {
            return Err(BenchmarkError::RaggedRow {
                line: *line,
                expected: headers.len(),
                found: values.len(),
            });
        }

        let cells = values
            .into_iter()
            .zip(&headers)
            .enumerate()
            .map(|(column, (value, header))| BenchmarkCell {
                is_method: column == 0,
                ..BenchmarkCell::new(value, header.as_str())
            })
            .collect();
        rows.push(BenchmarkRow { cells });
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed benchmark table");
    Ok(BenchmarkTable { headers, rows })
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '-' | '|' | ':' | ' '))
}

fn split_row(line: &str) -> Vec<String> {
    let inner = &line[1..line.len() - 1];
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Renders `table` as an HTML `<table>`.
pub fn table_html(table: &BenchmarkTable) -> String {
    let mut html = vec![r#"<table class="code-container">"#.to_string()];
    html.push("    <thead>".to_string());
    html.push("        <tr>".to_string());
    for header in &table.headers {
        html.push(format!("            <th>{header}</th>"));
    }
    html.push("        </tr>".to_string());
    html.push("    </thead>".to_string());

    html.push("    <tbody>".to_string());
    for row in &table.rows {
        html.push("        <tr>".to_string());
        for cell in row.sorted_cells(&table.headers) {
            if cell.is_method {
                html.push(format!(r#"            <td class="method">{}</td>"#, cell.render()));
            } else {
                html.push(format!("            <td>{}</td>", cell.render()));
            }
        }
        html.push("        </tr>".to_string());
    }
    html.push("    </tbody>".to_string());
    html.push("</table>".to_string());

    html.join("\n")
}

/// Substitutes the table into `template` at `{{TABLE_CODE}}`.
pub fn document_html(table: &BenchmarkTable, template: &str) -> String {
    template.replace("{{TABLE_CODE}}", &table_html(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = "
// * Summary *

BenchmarkDotNet v0.13.12, Windows 11

| Method     | Mean      | Error    | Ratio | Allocated |
|----------- |----------:|---------:|------:|----------:|
| Linq       | 120.4 ns  | 1.20 ns  |  1.00 |      72 B |
| ForLoop    |  15.2 ns  | 0.10 ns  |  0.13 |         - |
";

    #[test]
    fn test_parse_table() {
        let table = parse_benchmark_table(RESULTS).unwrap();

        assert_eq!(table.headers, ["Method", "Mean", "Error", "Ratio", "Allocated"]);
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.cell("Method").unwrap().value, "Linq");
        assert!(first.cell("Method").unwrap().is_method);
        assert_eq!(first.cell("Mean").unwrap().value, "120.4 ns");
        assert!(!first.cell("Mean").unwrap().is_method);
        assert_eq!(table.rows[1].cell("Allocated").unwrap().value, "-");
    }

    #[test]
    fn test_strips_encoding_artifacts() {
        let table = parse_benchmark_table("| Method | Mean |\n| A | 1Â ns |\n").unwrap();
        assert_eq!(table.rows[0].cell("Mean").unwrap().value, "1 ns");
    }

    #[test]
    fn test_no_table() {
        assert!(matches!(
            parse_benchmark_table("no results"),
            Err(BenchmarkError::NoTable)
        ));
    }

    #[test]
    fn test_ragged_row() {
        let result = parse_benchmark_table("| A | B |\n| 1 |\n");
        assert!(matches!(
            result,
            Err(BenchmarkError::RaggedRow { line: 2, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_toggle_underline() {
        let mut table = parse_benchmark_table(RESULTS).unwrap();

        assert_eq!(table.toggle_underline(1, 1), Some(true));
        assert!(table.rows[1].cell("Mean").unwrap().is_underlined);
        assert_eq!(table.toggle_underline(1, 1), Some(false));
        assert_eq!(table.toggle_underline(5, 0), None);
        assert_eq!(table.toggle_underline(0, 9), None);
    }

    #[test]
    fn test_render_cells() {
        let mut table = parse_benchmark_table(RESULTS).unwrap();
        table.toggle_underline(1, 0);
        table.toggle_underline(1, 1);

        let html = table_html(&table);
        assert!(html.contains("<th>Allocated</th>"));
        assert!(html.contains(r#"<td class="method">Linq</td>"#));
        assert!(html.contains(r#"<td class="method"><u class="method">ForLoop</u></td>"#));
        assert!(html.contains("<td><u>15.2 ns</u></td>"));
    }

    #[test]
    fn test_document_html() {
        let table = parse_benchmark_table(RESULTS).unwrap();
        let html = document_html(&table, "<body>{{TABLE_CODE}}</body>");
        assert!(html.starts_with(r#"<body><table class="code-container">"#));
        assert!(html.ends_with("</table></body>"));
    }
}
