//! Default app registrations
//!
//! Builds the standard demo set: calculator, sales table, charts, and the
//! component gallery. Each factory constructs a fresh model plus its
//! element tree, so every launch is an independent instance.

use jaffolding_core::Element;
use jaffolding_desktop::{AppDefinition, AppDescriptor, Rect, Window};

use crate::calculator::Calculator;
use crate::chart::Chart;
use crate::sales::fallback_dataset;
use crate::table::{ColumnType, DataTable};

/// The built-in demo apps, in dock order.
pub fn default_apps() -> Vec<AppDefinition> {
    vec![
        AppDefinition::new(
            AppDescriptor::new("calculator", "Calculator", "🧮", "#5e81ac"),
            || {
                let calc = Calculator::new();
                Window::new("Calculator", calculator_view(&calc))
                    .with_rect(Rect::new(80.0, 60.0, 320.0, 420.0))
            },
        ),
        AppDefinition::new(
            AppDescriptor::new("sales", "Sales Data", "📋", "#a3be8c"),
            || {
                let table = sales_table();
                Window::new("Sales Data", table_view(&table))
                    .with_rect(Rect::new(120.0, 90.0, 640.0, 420.0))
            },
        ),
        AppDefinition::new(
            AppDescriptor::new("charts", "Charts", "📊", "#b48ead"),
            || {
                let mut chart = Chart::new();
                chart.load_sales(&fallback_dataset());
                Window::new("Charts", chart_view(&chart))
                    .with_rect(Rect::new(160.0, 120.0, 560.0, 400.0))
            },
        ),
        AppDefinition::new(
            AppDescriptor::new("gallery", "Components", "🧩", "#ebcb8b"),
            || {
                Window::new("Components", gallery_view())
                    .with_rect(Rect::new(200.0, 150.0, 480.0, 360.0))
            },
        ),
    ]
}

/// Sales table preloaded with the fallback dataset.
pub fn sales_table() -> DataTable {
    let mut table = DataTable::new(&["id", "product", "category", "sales", "revenue", "month"]);
    table
        .set_column_type("id", ColumnType::Number)
        .set_column_type("sales", ColumnType::Number)
        .set_column_type("revenue", ColumnType::Number);
    table.set_rows(fallback_dataset().iter().map(|r| r.to_row()).collect());
    table
}

fn calculator_view(calc: &Calculator) -> Element {
    let display = Element::new("div")
        .with_attribute("data-role", "display")
        .with_style("text-align", "right")
        .with_style("font-family", "monospace")
        .with_style("font-size", "24px")
        .with_style("padding", "15px")
        .with_style("background-color", "#3b4252")
        .with_text(calc.display());

    let keypad_labels = [
        "MC", "MR", "M+", "M-", "C", "CE", "±", "÷", "7", "8", "9", "×", "4", "5", "6", "-", "1",
        "2", "3", "+", "0", ".", "=",
    ];
    let mut keypad = Element::new("div")
        .with_style("display", "grid")
        .with_style("grid-template-columns", "repeat(4, 1fr)")
        .with_style("grid-gap", "10px")
        .with_style("padding", "10px");
    for label in keypad_labels {
        keypad.push_child(
            Element::new("button")
                .with_attribute("data-key", label)
                .with_text(label),
        );
    }

    Element::new("div")
        .with_style("display", "flex")
        .with_style("flex-direction", "column")
        .with_style("background-color", "#2e3440")
        .with_style("color", "#eceff4")
        .with_child(display)
        .with_child(keypad)
}

fn table_view(table: &DataTable) -> Element {
    let mut header = Element::new("tr");
    for column in table.columns() {
        header.push_child(Element::new("th").with_text(column.as_str()));
    }

    let mut body = Element::new("tbody");
    for row in table.view() {
        let mut tr = Element::new("tr");
        for column in table.columns() {
            let text = row
                .get(column)
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default();
            tr.push_child(Element::new("td").with_text(text));
        }
        body.push_child(tr);
    }

    Element::new("table")
        .with_style("width", "100%")
        .with_style("border-collapse", "collapse")
        .with_child(Element::new("thead").with_child(header))
        .with_child(body)
}

fn chart_view(chart: &Chart) -> Element {
    // The canvas is drawn by the web layer; the model rides along in data
    // attributes for the renderer to pick up.
    Element::new("div")
        .with_attribute("data-role", "chart")
        .with_attribute("data-kind", format!("{:?}", chart.kind()).to_lowercase())
        .with_attribute("data-series", chart.datasets().len().to_string())
        .with_style("width", "100%")
        .with_style("height", "100%")
        .with_child(Element::new("canvas"))
}

fn gallery_view() -> Element {
    let mut list = Element::new("ul");
    for name in ["Button", "Label", "TextField", "Panel", "TabPane"] {
        list.push_child(Element::new("li").with_text(name));
    }
    Element::new("div")
        .with_style("padding", "12px")
        .with_child(Element::new("h3").with_text("Component gallery"))
        .with_child(list)
}
