//! Table output for CLI commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

/// Build a table with the standard preset and a cyan header.
pub fn build_table(headers: &[&str], rows: Vec<Vec<(String, Option<Color>)>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        let cells: Vec<Cell> = row
            .into_iter()
            .map(|(text, color)| match color {
                Some(c) => Cell::new(text).fg(c),
                None => Cell::new(text),
            })
            .collect();
        table.add_row(cells);
    }

    table
}

/// Print a table to stdout.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(|text| (text, None)).collect())
        .collect();
    println!("{}", build_table(headers, rows));
}

/// Print a table whose cells may carry a foreground color.
pub fn print_table_colored(headers: &[&str], rows: Vec<Vec<(String, Option<Color>)>>) {
    println!("{}", build_table(headers, rows));
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table_contains_cells() {
        let table = build_table(
            &["raw", "kind"],
            vec![vec![("560-0152-4-8".to_string(), None), ("num".to_string(), Some(Color::Green))]],
        );
        let rendered = table.to_string();
        assert!(rendered.contains("raw"));
        assert!(rendered.contains("560-0152-4-8"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("180-0557-1,2,3,4,5", 10), "180-055...");
    }
}
