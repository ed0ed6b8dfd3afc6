//! Data table model
//!
//! Column-typed tabular data with sorting, per-column substring filters,
//! and row selection. Rows are JSON objects so the table can ingest fetch
//! responses directly. The rendered view is always filters first, then the
//! active sort; the underlying rows are never reordered or dropped.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

/// One table row, a JSON object keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// How a column's values compare when sorting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    /// ISO-8601 date strings; ordering is lexicographic, which matches
    /// chronological order for that format.
    Date,
}

/// Sortable, filterable table model.
#[derive(Debug, Default)]
pub struct DataTable {
    columns: Vec<String>,
    types: HashMap<String, ColumnType>,
    rows: Vec<Row>,
    // Filter values are stored lowercased
    filters: HashMap<String, String>,
    sort: Option<(String, bool)>,
    selected: Option<usize>,
}

impl DataTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Declare a column's type. Untyped columns compare as text.
    pub fn set_column_type(&mut self, column: &str, ty: ColumnType) -> &mut Self {
        self.types.insert(column.to_string(), ty);
        self
    }

    pub fn column_type(&self, column: &str) -> ColumnType {
        self.types.get(column).copied().unwrap_or_default()
    }

    /// Replace all rows. Clears the selection.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> &mut Self {
        self.rows = rows;
        self.selected = None;
        self
    }

    pub fn push_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn remove_row(&mut self, index: usize) -> &mut Self {
        if index < self.rows.len() {
            self.rows.remove(index);
            if self.selected.is_some_and(|s| s >= self.rows.len()) {
                self.selected = self.rows.len().checked_sub(1);
            }
        }
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn select_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected = Some(index);
        }
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    /// Active sort, as (column, ascending).
    pub fn sort(&self) -> Option<(&str, bool)> {
        self.sort.as_ref().map(|(c, asc)| (c.as_str(), *asc))
    }

    /// Sort the view by a column.
    pub fn sort_by(&mut self, column: &str, ascending: bool) -> &mut Self {
        self.sort = Some((column.to_string(), ascending));
        self
    }

    /// Header-click behavior: first click sorts ascending, clicking the
    /// already-sorted column flips the direction.
    pub fn toggle_sort(&mut self, column: &str) -> &mut Self {
        let ascending = match &self.sort {
            Some((current, asc)) if current == column => !asc,
            _ => true,
        };
        self.sort_by(column, ascending)
    }

    /// Set a case-insensitive substring filter on a column. An empty or
    /// blank value removes the filter.
    pub fn filter(&mut self, column: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.filters.remove(column);
        } else {
            self.filters.insert(column.to_string(), value.to_lowercase());
        }
        self
    }

    pub fn clear_filters(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    /// The rows as currently presented: filters applied, then the active
    /// sort. Rows missing a filtered column are excluded.
    pub fn view(&self) -> Vec<&Row> {
        let mut rows: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| self.matches_filters(row))
            .collect();

        if let Some((column, ascending)) = &self.sort {
            let ty = self.column_type(column);
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(column), b.get(column), ty);
                if *ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        rows
    }

    fn matches_filters(&self, row: &Row) -> bool {
        self.filters.iter().all(|(column, needle)| {
            row.get(column)
                .filter(|v| !v.is_null())
                .is_some_and(|v| cell_text(v).to_lowercase().contains(needle))
        })
    }
}

/// Cell text without JSON string quoting.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Missing cells sort before present ones; otherwise comparison follows
/// the column type.
fn compare_cells(a: Option<&Value>, b: Option<&Value>, ty: ColumnType) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match ty {
            ColumnType::Number => {
                let x = numeric(a);
                let y = numeric(b);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            ColumnType::Text | ColumnType::Date => cell_text(a).cmp(&cell_text(b)),
        },
    }
}

fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(product: &str, sales: i64, month: &str) -> Row {
        match json!({ "product": product, "sales": sales, "month": month }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn table() -> DataTable {
        let mut t = DataTable::new(&["product", "sales", "month"]);
        t.set_column_type("sales", ColumnType::Number);
        t.set_rows(vec![
            row("Laptop", 120, "2024-01"),
            row("Phone", 950, "2024-03"),
            row("Tablet", 80, "2024-02"),
        ]);
        t
    }

    fn column<'a>(rows: &[&'a Row], name: &str) -> Vec<String> {
        rows.iter().map(|r| cell_text(&r[name])).collect()
    }

    #[test]
    fn test_numeric_sort_is_by_value_not_text() {
        let mut t = table();
        t.sort_by("sales", true);
        assert_eq!(column(&t.view(), "sales"), vec!["80", "120", "950"]);

        t.sort_by("sales", false);
        assert_eq!(column(&t.view(), "sales"), vec!["950", "120", "80"]);
    }

    #[test]
    fn test_date_sort_is_chronological() {
        let mut t = table();
        t.set_column_type("month", ColumnType::Date);
        t.sort_by("month", true);
        assert_eq!(column(&t.view(), "product"), vec!["Laptop", "Tablet", "Phone"]);
    }

    #[test]
    fn test_toggle_sort_flips_direction() {
        let mut t = table();
        t.toggle_sort("sales");
        assert_eq!(t.sort(), Some(("sales", true)));
        t.toggle_sort("sales");
        assert_eq!(t.sort(), Some(("sales", false)));
        t.toggle_sort("product");
        assert_eq!(t.sort(), Some(("product", true)));
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut t = table();
        t.filter("product", "AB");
        assert_eq!(column(&t.view(), "product"), vec!["Tablet"]);

        // Blank filter value removes the filter
        t.filter("product", "  ");
        assert_eq!(t.view().len(), 3);
    }

    #[test]
    fn test_filters_stack_across_columns_and_clear() {
        let mut t = table();
        t.filter("month", "2024");
        t.filter("product", "p");
        let rows = t.view();
        assert_eq!(column(&rows, "product"), vec!["Laptop", "Phone"]);

        t.clear_filters();
        assert_eq!(t.view().len(), 3);
    }

    #[test]
    fn test_view_applies_filters_then_sort() {
        let mut t = table();
        t.filter("product", "p");
        t.sort_by("sales", false);
        assert_eq!(column(&t.view(), "product"), vec!["Phone", "Laptop"]);
        // Underlying rows untouched
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn test_rows_missing_filtered_column_are_excluded() {
        let mut t = table();
        let mut bare = Row::new();
        bare.insert("sales".into(), json!(10));
        t.push_row(bare);

        t.filter("product", "a");
        assert_eq!(column(&t.view(), "product"), vec!["Laptop", "Tablet"]);
    }

    #[test]
    fn test_selection_clamps_on_removal() {
        let mut t = table();
        t.select_row(2);
        t.remove_row(2);
        assert_eq!(t.selected_row(), Some(1));
        t.remove_row(5); // out of range: no-op
        assert_eq!(t.row_count(), 2);
    }
}
