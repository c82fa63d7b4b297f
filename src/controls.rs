//! The options offered by the dashboard's three selection controls

use crate::selection::ALL_TYPES;
use crate::{ChartShape, Dataset, Metric};

/// A single option of a selection control
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ControlOption {
    pub label: String,
    pub value: String,
}

impl ControlOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// The options of all three controls for one dataset
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Controls {
    pub metric: Vec<ControlOption>,
    pub transaction_types: Vec<ControlOption>,
    pub chart_shape: Vec<ControlOption>,
}

impl Controls {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            metric: metric_options(),
            transaction_types: type_filter_options(dataset),
            chart_shape: chart_shape_options(),
        }
    }
}

/// Options of the metric dropdown
pub fn metric_options() -> Vec<ControlOption> {
    [Metric::Count, Metric::Amount]
        .into_iter()
        .map(|metric| ControlOption::new(metric.label(), metric.value()))
        .collect()
}

/// Options of the transaction type multi-select
///
/// "Select All" comes first, followed by every distinct transaction type of
/// the dataset.
pub fn type_filter_options(dataset: &Dataset) -> Vec<ControlOption> {
    std::iter::once(ControlOption::new("Select All", ALL_TYPES))
        .chain(
            dataset
                .transaction_types()
                .into_iter()
                .map(|name| ControlOption::new(name, name)),
        )
        .collect()
}

/// Options of the chart type radio buttons
pub fn chart_shape_options() -> Vec<ControlOption> {
    [ChartShape::Bar, ChartShape::Pie]
        .into_iter()
        .map(|shape| ControlOption::new(shape.label(), shape.value()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, TransactionRow};

    #[test]
    fn metric() {
        assert_eq!(
            metric_options(),
            vec![
                ControlOption::new("Transaction Count", "txn"),
                ControlOption::new("Transaction Amount", "amount"),
            ]
        );
    }

    #[test]
    fn chart_shape() {
        assert_eq!(
            chart_shape_options(),
            vec![
                ControlOption::new("Bar Chart", "0"),
                ControlOption::new("Pie Chart", "1"),
            ]
        );
    }

    #[test]
    fn type_filter_lists_distinct_types_after_select_all() {
        let dataset = Dataset::from_rows(vec![
            TransactionRow::new("Deposit", 10, Amount::from_num(1000)),
            TransactionRow::new("Withdraw", 5, Amount::from_num(500)),
            TransactionRow::new("Deposit", 3, Amount::from_num(300)),
        ]);

        assert_eq!(
            type_filter_options(&dataset),
            vec![
                ControlOption::new("Select All", "all"),
                ControlOption::new("Deposit", "Deposit"),
                ControlOption::new("Withdraw", "Withdraw"),
            ]
        );
    }

    #[test]
    fn controls_for_empty_dataset() {
        let controls = Controls::for_dataset(&Dataset::default());

        assert_eq!(controls.metric.len(), 2);
        assert_eq!(controls.chart_shape.len(), 2);
        assert_eq!(controls.transaction_types, vec![ControlOption::new("Select All", "all")]);
    }

    #[test]
    fn option_values_parse_back() {
        for option in chart_shape_options() {
            assert!(option.value.parse::<ChartShape>().is_ok());
        }
        for option in metric_options() {
            assert!(option.value.parse::<Metric>().is_ok());
        }
    }
}
