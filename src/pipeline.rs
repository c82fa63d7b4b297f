use crate::format::{self, DEFAULT_CURRENCY};
use crate::{Amount, Chart, ChartPoint, Dataset, Metric, Selection, TransactionRow, TxnCount};

/// The totals and chart computed for one selection
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateResult {
    /// The summed transaction count of all rows surviving the type filter
    pub total_count: TxnCount,
    /// The summed amount of all rows surviving the type filter
    pub total_amount: Amount,
    pub chart: Chart,
}

impl AggregateResult {
    /// The total count as shown on the dashboard, e.g. `1,234`
    pub fn formatted_count(&self) -> String {
        format::format_count(self.total_count)
    }

    /// The total amount as shown on the dashboard, e.g. `MMK - 1,800.00`
    pub fn formatted_amount(&self) -> String {
        self.formatted_amount_in(DEFAULT_CURRENCY)
    }

    /// The total amount, prefixed with a custom currency code
    pub fn formatted_amount_in(&self, currency: &str) -> String {
        format::format_amount(self.total_amount, currency)
    }
}

/// The aggregation pipeline over one loaded dataset
///
/// The pipeline holds no state of its own besides the borrowed dataset, so
/// every call to [`Pipeline::compute`] with the same selection yields the
/// same result.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline<'a> {
    dataset: &'a Dataset,
}

impl<'a> Pipeline<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// The dataset the pipeline works on
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Computes totals and chart for the selection
    pub fn compute(&self, selection: &Selection) -> AggregateResult {
        compute(self.dataset.rows(), selection)
    }
}

/// Filters the rows by the selected transaction types, sums up count and
/// amount of the working set, and builds the chart for the selected metric
/// and shape
///
/// Both totals are always computed, independent of the selected metric.
/// Rows are plotted one by one, so rows sharing a transaction type name show
/// up as separate points.
pub fn compute(rows: &[TransactionRow], selection: &Selection) -> AggregateResult {
    let working_set = rows
        .iter()
        .filter(|row| selection.type_filter.matches(row.transaction_type_name()));

    let mut total_count: TxnCount = 0;
    let mut total_amount = Amount::ZERO;
    let mut series = Vec::new();
    for row in working_set {
        total_count = total_count.saturating_add(row.txn_count());
        total_amount = total_amount.saturating_add(row.amount());

        let value = match selection.metric {
            Metric::Count => row.txn_count() as f64,
            Metric::Amount => row.amount().to_num::<f64>(),
        };
        series.push(ChartPoint::new(row.transaction_type_name(), value));
    }

    log::debug!("Computed {} with {} rows in the working set", selection, series.len());

    AggregateResult {
        total_count,
        total_amount,
        chart: Chart::new(selection.chart_shape, series),
    }
}
