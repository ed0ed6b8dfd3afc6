//! Chart model
//!
//! Pure data model for the chart demo: kind, labels, datasets, and a
//! revision counter the renderer subscribes to. The web layer re-draws on
//! each revision bump; off-browser tests work directly against the model.
//! Grouped sales data becomes one dataset per category with months as the
//! label axis.

use jaffolding_core::State;
use tracing::debug;

use crate::sales::SalesRecord;

/// Chart rendering style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

/// One plotted series.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
}

/// Series palette, cycled per dataset.
const PALETTE: &[&str] = &[
    "#5294e2", "#bf616a", "#a3be8c", "#ebcb8b", "#b48ead", "#88c0d0",
];

/// Chart state: kind, labels, datasets, and the change revision.
pub struct Chart {
    kind: ChartKind,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    revision: State<u64>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.kind)
            .field("labels", &self.labels)
            .field("datasets", &self.datasets.len())
            .finish()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            kind: ChartKind::default(),
            labels: Vec::new(),
            datasets: Vec::new(),
            revision: State::new(0),
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Subscribe to model changes. The callback fires immediately with the
    /// current revision and again on every mutation.
    pub fn on_change(&mut self, listener: impl FnMut(&u64) + 'static) {
        self.revision.subscribe(listener);
    }

    fn touch(&mut self) {
        self.revision.update(|rev| *rev += 1);
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        if self.kind != kind {
            self.kind = kind;
            self.touch();
        }
    }

    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
        self.touch();
    }

    pub fn add_dataset(&mut self, label: impl Into<String>, data: Vec<f64>) {
        let color = PALETTE[self.datasets.len() % PALETTE.len()];
        self.datasets.push(Dataset {
            label: label.into(),
            data,
            background_color: format!("{color}33"),
            border_color: color.to_string(),
        });
        self.touch();
    }

    pub fn clear_datasets(&mut self) {
        self.datasets.clear();
        self.touch();
    }

    /// Load grouped sales data: labels are the distinct months in first-seen
    /// order, and each category becomes a dataset of per-month sales sums.
    pub fn load_sales(&mut self, records: &[SalesRecord]) {
        let mut months: Vec<String> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        for record in records {
            if !months.contains(&record.month) {
                months.push(record.month.clone());
            }
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }

        self.datasets.clear();
        for category in &categories {
            let data = months
                .iter()
                .map(|month| {
                    records
                        .iter()
                        .filter(|r| &r.category == category && &r.month == month)
                        .map(|r| r.sales as f64)
                        .sum()
                })
                .collect();
            let color = PALETTE[self.datasets.len() % PALETTE.len()];
            self.datasets.push(Dataset {
                label: category.clone(),
                data,
                background_color: format!("{color}33"),
                border_color: color.to_string(),
            });
        }
        self.labels = months;
        debug!(
            labels = self.labels.len(),
            series = self.datasets.len(),
            "chart loaded from sales data"
        );
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::fallback_dataset;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_load_sales_groups_by_category_over_months() {
        let mut chart = Chart::new();
        chart.load_sales(&fallback_dataset());

        assert_eq!(chart.labels(), ["January", "February"]);
        assert_eq!(chart.datasets().len(), 2);

        let electronics = &chart.datasets()[0];
        assert_eq!(electronics.label, "Electronics");
        // January: 120 + 200 + 80, February: 130 + 180 + 85
        assert_eq!(electronics.data, vec![400.0, 395.0]);

        let accessories = &chart.datasets()[1];
        assert_eq!(accessories.data, vec![250.0, 280.0]);
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut chart = Chart::new();
        let seen = Rc::new(Cell::new(0u64));
        let slot = seen.clone();
        chart.on_change(move |rev| slot.set(*rev));
        assert_eq!(seen.get(), 0);

        chart.set_kind(ChartKind::Line);
        assert_eq!(seen.get(), 1);
        // Same kind again: no change, no notification
        chart.set_kind(ChartKind::Line);
        assert_eq!(seen.get(), 1);

        chart.add_dataset("Revenue", vec![1.0, 2.0]);
        assert_eq!(seen.get(), 2);
        chart.clear_datasets();
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_palette_cycles() {
        let mut chart = Chart::new();
        for i in 0..8 {
            chart.add_dataset(format!("s{i}"), vec![]);
        }
        assert_eq!(
            chart.datasets()[0].border_color,
            chart.datasets()[6].border_color
        );
        assert_ne!(
            chart.datasets()[0].border_color,
            chart.datasets()[1].border_color
        );
    }
}
