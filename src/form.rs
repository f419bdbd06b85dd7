//! Entry-form generation
//!
//! The per-column input form is derived from a table's fixed column list:
//! one string-valued field per column, in header order. The calling layer
//! renders the fields however it likes; collecting them back yields exactly
//! the row map that [`Table::with_new_row`](crate::types::Table::with_new_row)
//! consumes.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::Table;

/// One input field of the generated entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Column name, used as the field label and the row key.
    pub name: String,
    /// Current input value. Starts empty; the empty string is a valid cell.
    pub value: String,
}

/// Build the entry form for a table, one empty field per column.
pub fn fields_for(table: &Table) -> Vec<FormField> {
    table
        .columns
        .iter()
        .map(|col| FormField {
            name: col.clone(),
            value: String::new(),
        })
        .collect()
}

/// Collect filled-in fields into the row map consumed by row insertion.
pub fn collect_values(fields: &[FormField]) -> HashMap<String, String> {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory_table() -> Table {
        Table::new(
            "Inventory".to_string(),
            vec!["Item".to_string(), "Qty".to_string(), "Note".to_string()],
        )
    }

    #[test]
    fn test_one_field_per_column_in_header_order() {
        let fields = fields_for(&inventory_table());
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Item", "Qty", "Note"]);
        assert!(fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_collected_form_round_trips_into_a_row() {
        let table = inventory_table();
        let mut fields = fields_for(&table);
        fields[0].value = "Crate".to_string();
        fields[1].value = "12".to_string();
        // Note left empty on purpose.

        let values = collect_values(&fields);
        let updated = table.with_new_row(&values).unwrap();
        assert_eq!(
            updated.rows[0],
            vec!["Crate".to_string(), "12".to_string(), "".to_string()]
        );
    }
}
