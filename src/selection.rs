use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The control value selecting every transaction type
pub const ALL_TYPES: &str = "all";

/// Possible errors to occur while parsing selection values
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown metric `{0}`, expected `txn` or `amount`")]
    UnknownMetric(String),
    #[error("Unknown chart type `{0}`, expected `bar`, `pie`, `0` or `1`")]
    UnknownChartShape(String),
}

/// The numeric field that's plotted per row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// The number of transactions
    #[default]
    Count,
    /// The transaction amount
    Amount,
}

impl Metric {
    /// The value the metric control submits
    pub fn value(self) -> &'static str {
        match self {
            Metric::Count => "txn",
            Metric::Amount => "amount",
        }
    }

    /// The label the metric control shows
    pub fn label(self) -> &'static str {
        match self {
            Metric::Count => "Transaction Count",
            Metric::Amount => "Transaction Amount",
        }
    }
}

impl FromStr for Metric {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txn" | "count" => Ok(Metric::Count),
            "amount" => Ok(Metric::Amount),
            _ => Err(SelectionError::UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// The shape the chart is drawn in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartShape {
    #[default]
    Bar,
    Pie,
}

impl ChartShape {
    /// The value the chart type control submits
    pub fn value(self) -> &'static str {
        match self {
            ChartShape::Bar => "0",
            ChartShape::Pie => "1",
        }
    }

    /// The label the chart type control shows
    pub fn label(self) -> &'static str {
        match self {
            ChartShape::Bar => "Bar Chart",
            ChartShape::Pie => "Pie Chart",
        }
    }
}

impl FromStr for ChartShape {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "bar" => Ok(ChartShape::Bar),
            "1" | "pie" => Ok(ChartShape::Pie),
            _ => Err(SelectionError::UnknownChartShape(s.to_string())),
        }
    }
}

impl fmt::Display for ChartShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartShape::Bar => f.write_str("bar"),
            ChartShape::Pie => f.write_str("pie"),
        }
    }
}

/// The transaction types a selection is restricted to
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Every row is kept
    #[default]
    All,
    /// Only rows whose type name is in the set are kept
    ///
    /// An empty set keeps nothing.
    Only(BTreeSet<String>),
}

impl TypeFilter {
    /// Builds a filter from the values of the multi-select control
    ///
    /// As soon as the values contain [`ALL_TYPES`], the other values don't
    /// matter anymore and every row is kept.
    pub fn from_values<I, S>(values: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<String>>();

        match values.contains(ALL_TYPES) {
            true => TypeFilter::All,
            false => TypeFilter::Only(values),
        }
    }

    /// A filter that keeps no rows
    pub fn none() -> Self {
        TypeFilter::Only(BTreeSet::new())
    }

    /// Whether rows of the given transaction type survive the filter
    pub fn matches(&self, transaction_type_name: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(types) => types.contains(transaction_type_name),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str(ALL_TYPES),
            TypeFilter::Only(types) if types.is_empty() => f.write_str("none"),
            TypeFilter::Only(types) => {
                let types = types.iter().map(String::as_str).collect::<Vec<_>>();
                f.write_str(&types.join(", "))
            }
        }
    }
}

/// The current user chosen metric, type filter and chart shape
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Selection {
    pub metric: Metric,
    pub type_filter: TypeFilter,
    pub chart_shape: ChartShape,
}

impl Selection {
    pub fn new(metric: Metric, type_filter: TypeFilter, chart_shape: ChartShape) -> Self {
        Self { metric, type_filter, chart_shape }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "metric={} types=[{}] chart={}",
            self.metric, self.type_filter, self.chart_shape,
        )
    }
}
