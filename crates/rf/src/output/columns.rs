//! Column directory output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use rowfilter_rs::{Column, ColumnDirectory};

/// JSON output structure for the columns command.
#[derive(Serialize)]
pub struct ColumnsOutput<'a> {
    pub columns: &'a [Column],
}

/// Formats the column directory as JSON.
pub fn format_columns_json(directory: &ColumnDirectory) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ColumnsOutput {
        columns: directory.columns(),
    })
}

/// Formats the column directory as a table.
pub fn format_columns_table(directory: &ColumnDirectory, use_colors: bool) -> String {
    if directory.is_empty() {
        return "No columns found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<7} {:<6} {}", "Offset", "Index", "Name");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for column in directory.columns() {
        let index = column.index.map(|i| i.to_string()).unwrap_or_default();
        let name = match &column.full_name {
            Some(full) => format!("{} ({})", column.name, full),
            None => column.name.clone(),
        };
        output.push_str(&format!("{:<7} {:<6} {}\n", column.offset, index, name));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_table() {
        let dir = ColumnDirectory::from_names(["name", "age"]).unwrap();
        assert_eq!(
            format_columns_table(&dir, false),
            "Offset  Index  Name\n1       1      name\n2       2      age\n"
        );
    }

    #[test]
    fn test_columns_table_empty() {
        let dir = ColumnDirectory::default();
        assert_eq!(format_columns_table(&dir, false), "No columns found.\n");
    }

    #[test]
    fn test_columns_json() {
        let dir = ColumnDirectory::from_names(["name"]).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&format_columns_json(&dir).unwrap()).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "columns": [
                    { "name": "name", "index": 1, "position": 0, "offset": 1 }
                ]
            })
        );
    }
}
