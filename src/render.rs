use std::fmt::{self, Write};
use std::str::FromStr;

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, TableComponent};

use crate::format::{group_thousands, DEFAULT_CURRENCY};
use crate::controls::{ControlOption, Controls};
use crate::{AggregateResult, Chart, ChartStyle, Selection, TxnCount};

const HEADING: &str = "Transaction Dashboard";
const EMPTY_CHART: &str = "No data for the current selection";
const BAR: char = '█';
const MIN_BAR_WIDTH: usize = 10;

/// Possible errors to occur while rendering a dashboard frame
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    #[error("Unknown output format `{0}`, expected `text` or `json`")]
    UnknownFormat(String),
}

/// How a dashboard frame is written out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Cards and chart drawn for the terminal
    #[default]
    Text,
    /// The selection, totals and chart description as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Renders computed results as dashboard frames
#[derive(Clone, Debug)]
pub struct Renderer {
    format: OutputFormat,
    currency: String,
    /// The terminal width the text output is fitted into
    width: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(OutputFormat::Text, DEFAULT_CURRENCY, 80)
    }
}

#[derive(serde::Serialize)]
struct JsonFrame<'a> {
    selection: &'a Selection,
    total_count: TxnCount,
    total_amount: f64,
    formatted_count: String,
    formatted_amount: String,
    chart: &'a Chart,
}

impl Renderer {
    pub fn new(format: OutputFormat, currency: impl Into<String>, width: usize) -> Self {
        Self { format, currency: currency.into(), width }
    }

    /// Renders one frame in the configured output format
    pub fn render(&self, selection: &Selection, result: &AggregateResult) -> Result<String, RenderError> {
        match self.format {
            OutputFormat::Text => self.render_text(selection, result),
            OutputFormat::Json => self.render_json(selection, result),
        }
    }

    /// Renders the heading, both total cards and the chart
    pub fn render_text(&self, selection: &Selection, result: &AggregateResult) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "{HEADING}")?;
        writeln!(out, "{selection}")?;
        writeln!(out)?;
        writeln!(out, "{}", self.cards(result))?;
        writeln!(out)?;
        writeln!(out, "{}", result.chart.title)?;

        if result.chart.is_empty() {
            writeln!(out, "{EMPTY_CHART}")?;
            return Ok(out);
        }

        match &result.chart.style {
            ChartStyle::Bar { x_axis_title, y_axis_title, .. } => {
                self.bar_chart(&mut out, &result.chart, x_axis_title, y_axis_title)?;
            }
            ChartStyle::Pie { .. } => {
                writeln!(out, "{}", self.pie_legend(&result.chart))?;
            }
        }

        Ok(out)
    }

    /// Renders the selection, the totals and the chart description as JSON
    pub fn render_json(&self, selection: &Selection, result: &AggregateResult) -> Result<String, RenderError> {
        let frame = JsonFrame {
            selection,
            total_count: result.total_count,
            total_amount: result.total_amount.to_num(),
            formatted_count: result.formatted_count(),
            formatted_amount: result.formatted_amount_in(&self.currency),
            chart: &result.chart,
        };
        Ok(serde_json::to_string_pretty(&frame)?)
    }

    /// Renders the options of every control, with the value to type for each
    pub fn render_controls(&self, controls: &Controls) -> Result<String, RenderError> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(controls)?);
        }

        let mut out = String::new();
        for (title, options) in [
            ("Select Visualization Type:", &controls.metric),
            ("Select Transaction Types:", &controls.transaction_types),
            ("Select Chart Type:", &controls.chart_shape),
        ] {
            writeln!(out, "{title}")?;
            writeln!(out, "{}", self.options_table(options))?;
        }
        Ok(out)
    }

    fn options_table(&self, options: &[ControlOption]) -> Table {
        let mut table = self.table();
        table.set_header(vec!["Option", "Value"]);
        for option in options {
            table.add_row(vec![Cell::new(&option.label), Cell::new(&option.value)]);
        }
        table
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(u16::try_from(self.width).unwrap_or(u16::MAX));
        table.remove_style(TableComponent::HorizontalLines);
        table.remove_style(TableComponent::MiddleIntersections);
        table.remove_style(TableComponent::LeftBorderIntersections);
        table.remove_style(TableComponent::RightBorderIntersections);
        table
    }

    fn cards(&self, result: &AggregateResult) -> Table {
        let mut table = self.table();
        table.set_header(vec![
            Cell::new("Total Transaction Count").set_alignment(CellAlignment::Center),
            Cell::new("Total Transaction Amount").set_alignment(CellAlignment::Center),
        ]);
        table.add_row(vec![
            Cell::new(result.formatted_count()).set_alignment(CellAlignment::Center),
            Cell::new(result.formatted_amount_in(&self.currency)).set_alignment(CellAlignment::Center),
        ]);
        table
    }

    // Labels go horizontally in front of each bar instead of rotated below it
    fn bar_chart(&self, out: &mut String, chart: &Chart, x_axis_title: &str, y_axis_title: &str) -> fmt::Result {
        let labels = chart
            .series
            .iter()
            .map(|point| point.category.chars().count())
            .chain(std::iter::once(x_axis_title.chars().count()))
            .max()
            .unwrap_or(0);
        let values = chart
            .series
            .iter()
            .map(|point| format_value(point.value))
            .collect::<Vec<_>>();
        let value_width = values.iter().map(String::len).max().unwrap_or(0);
        let bar_width = self
            .width
            .saturating_sub(labels + value_width + 4)
            .max(MIN_BAR_WIDTH);
        let max = chart
            .series
            .iter()
            .map(|point| point.value)
            .fold(0.0_f64, f64::max);

        writeln!(out, "{x_axis_title:<labels$} │ {y_axis_title}")?;
        for (point, value) in chart.series.iter().zip(values) {
            let bar = BAR.to_string().repeat(bar_length(point.value, max, bar_width));
            writeln!(out, "{:<labels$} │ {bar} {value}", point.category)?;
        }
        Ok(())
    }

    fn pie_legend(&self, chart: &Chart) -> Table {
        let total = chart.series.iter().map(|point| point.value).sum::<f64>();

        let mut table = self.table();
        table.set_header(vec!["Slice", "Value", "Share"]);
        for point in &chart.series {
            table.add_row(vec![
                Cell::new(&point.category),
                Cell::new(format_value(point.value)).set_alignment(CellAlignment::Right),
                Cell::new(format_share(point.value, total)).set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }
}

/// The number of bar characters a value is drawn with
///
/// Values are scaled linearly so `max` fills `width`. Non positive values get
/// no bar at all.
fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// Whole values are shown as grouped integers, everything else with two
/// decimals
fn format_value(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let sign = if value < 0.0 && rendered != "0.00" { "-" } else { "" };

    match fraction {
        "00" => format!("{sign}{}", group_thousands(whole)),
        _ => format!("{sign}{}.{fraction}", group_thousands(whole)),
    }
}

fn format_share(value: f64, total: f64) -> String {
    match total > 0.0 {
        true => format!("{:.1}%", value / total * 100.0),
        false => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute, Amount, ChartShape, Metric, TransactionRow, TypeFilter};

    fn rows() -> Vec<TransactionRow> {
        vec![
            TransactionRow::new("Deposit", 10, Amount::from_num(1000)),
            TransactionRow::new("Withdraw", 5, Amount::from_num(500)),
            TransactionRow::new("Deposit", 3, Amount::from_num(300)),
        ]
    }

    #[test]
    fn parse_output_format() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(RenderError::UnknownFormat(_)),
        ));
    }

    #[test]
    fn bar_lengths_scale_to_the_maximum() {
        assert_eq!(bar_length(1000.0, 1000.0, 40), 40);
        assert_eq!(bar_length(500.0, 1000.0, 40), 20);
        assert_eq!(bar_length(0.0, 1000.0, 40), 0);
        assert_eq!(bar_length(-5.0, 1000.0, 40), 0);
        assert_eq!(bar_length(5.0, 0.0, 40), 0);
    }

    #[test]
    fn values() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(1234567.0), "1,234,567");
        assert_eq!(format_value(1500.5), "1,500.50");
        assert_eq!(format_value(-2500.0), "-2,500");
    }

    #[test]
    fn shares() {
        assert_eq!(format_share(25.0, 100.0), "25.0%");
        assert_eq!(format_share(1.0, 3.0), "33.3%");
        assert_eq!(format_share(1.0, 0.0), "-");
    }

    #[test]
    fn text_bar_frame() {
        let selection = Selection::new(Metric::Amount, TypeFilter::All, ChartShape::Bar);
        let result = compute(&rows(), &selection);
        let frame = Renderer::default().render_text(&selection, &result).unwrap();

        assert!(frame.starts_with("Transaction Dashboard\n"));
        assert!(frame.contains("Total Transaction Count"));
        assert!(frame.contains("Total Transaction Amount"));
        assert!(frame.contains("MMK - 1,800.00"));
        assert!(frame.contains("Transaction Types - Bar Chart"));
        assert_eq!(frame.lines().filter(|line| line.starts_with("Deposit ")).count(), 2);
        assert!(frame.contains(" 1,000\n"));
    }

    #[test]
    fn text_pie_frame() {
        let selection = Selection::new(Metric::Count, TypeFilter::All, ChartShape::Pie);
        let result = compute(&rows(), &selection);
        let frame = Renderer::new(OutputFormat::Text, "USD", 100).render_text(&selection, &result).unwrap();

        assert!(frame.contains("Transaction Types - Pie Chart"));
        assert!(frame.contains("USD - 1,800.00"));
        assert!(frame.contains("55.6%"));
        assert!(frame.contains("27.8%"));
        assert!(frame.contains("16.7%"));
    }

    #[test]
    fn text_format_renders_through_render() {
        let selection = Selection::new(Metric::Amount, TypeFilter::from_values(["Deposit"]), ChartShape::Bar);
        let result = compute(&rows(), &selection);
        let renderer = Renderer::new(OutputFormat::Text, DEFAULT_CURRENCY, 60);

        let frame = renderer.render(&selection, &result).unwrap();
        assert_eq!(frame, renderer.render_text(&selection, &result).unwrap());
        assert!(frame.ends_with(" 300\n"));
        assert_eq!(frame.lines().filter(|line| line.starts_with("Transaction Type ")).count(), 1);
        assert_eq!(frame.lines().filter(|line| line.starts_with("Deposit ")).count(), 2);
    }

    #[test]
    fn text_empty_frame() {
        let selection = Selection::new(Metric::Count, TypeFilter::none(), ChartShape::Bar);
        let result = compute(&rows(), &selection);
        let frame = Renderer::default().render_text(&selection, &result).unwrap();

        assert!(frame.contains("MMK - 0.00"));
        assert!(frame.contains(EMPTY_CHART));
    }

    #[test]
    fn text_controls() {
        let dataset = crate::Dataset::from_rows(rows());
        let text = Renderer::default()
            .render_controls(&Controls::for_dataset(&dataset))
            .unwrap();

        assert!(text.contains("Select Visualization Type:"));
        assert!(text.contains("Transaction Amount"));
        assert!(text.contains("Select All"));
        assert_eq!(text.matches("Withdraw").count(), 2);
        assert!(text.contains("Pie Chart"));
    }

    #[test]
    fn json_frame() {
        let selection = Selection::new(
            Metric::Amount,
            TypeFilter::from_values(["Withdraw"]),
            ChartShape::Pie,
        );
        let result = compute(&rows(), &selection);
        let json = Renderer::new(OutputFormat::Json, DEFAULT_CURRENCY, 80)
            .render(&selection, &result)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(json["total_count"], 5);
        assert_eq!(json["total_amount"], 500.0);
        assert_eq!(json["formatted_amount"], "MMK - 500.00");
        assert_eq!(json["selection"]["metric"], "amount");
        assert_eq!(json["selection"]["type_filter"]["only"][0], "Withdraw");
        assert_eq!(json["chart"]["style"]["type"], "pie");
        assert_eq!(json["chart"]["style"]["hole"], 0.0);
        assert_eq!(json["chart"]["series"][0]["category"], "Withdraw");
        assert_eq!(json["chart"]["series"][0]["value"], 500.0);
    }
}
