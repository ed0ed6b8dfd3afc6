//! Sales sample data
//!
//! The record shape matches the demo API's `/api/sales` payload. When the
//! endpoint is unreachable the shell falls back to the built-in dataset so
//! the table and chart demos always have something to show.

use serde::{Deserialize, Serialize};

use crate::table::Row;

/// One sales figure, as served by `/api/sales`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: u64,
    pub product: String,
    pub category: String,
    pub sales: i64,
    pub revenue: f64,
    pub month: String,
}

impl SalesRecord {
    fn new(id: u64, product: &str, category: &str, sales: i64, revenue: f64, month: &str) -> Self {
        Self {
            id,
            product: product.to_string(),
            category: category.to_string(),
            sales,
            revenue,
            month: month.to_string(),
        }
    }

    /// Table row for this record. Serialization of the struct cannot fail.
    pub fn to_row(&self) -> Row {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => Row::new(),
        }
    }
}

/// Built-in dataset used when the sales endpoint cannot be reached.
pub fn fallback_dataset() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new(1, "Laptop", "Electronics", 120, 120_000.0, "January"),
        SalesRecord::new(2, "Smartphone", "Electronics", 200, 100_000.0, "January"),
        SalesRecord::new(3, "Headphones", "Accessories", 150, 15_000.0, "January"),
        SalesRecord::new(4, "Monitor", "Electronics", 80, 24_000.0, "January"),
        SalesRecord::new(5, "Keyboard", "Accessories", 100, 5_000.0, "January"),
        SalesRecord::new(6, "Laptop", "Electronics", 130, 130_000.0, "February"),
        SalesRecord::new(7, "Smartphone", "Electronics", 180, 90_000.0, "February"),
        SalesRecord::new(8, "Headphones", "Accessories", 170, 17_000.0, "February"),
        SalesRecord::new(9, "Monitor", "Electronics", 85, 25_500.0, "February"),
        SalesRecord::new(10, "Keyboard", "Accessories", 110, 5_500.0, "February"),
    ]
}
