use crate::ChartShape;

/// One plotted point: a bar, or a pie slice
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self { category: category.into(), value }
    }
}

/// Shape specific presentation of a chart
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartStyle {
    /// Categories along the x-axis, values along the y-axis
    Bar {
        x_axis_title: &'static str,
        y_axis_title: &'static str,
        /// Rotation of the category labels in degrees
        tick_angle: i16,
        tick_font_size: u8,
        marker_color: &'static str,
    },
    /// Categories as slice labels, values as slice sizes
    Pie {
        /// Relative radius of the hole; `0` draws a full pie
        hole: f64,
    },
}

impl ChartStyle {
    /// The presentation used for charts of the given shape
    pub fn for_shape(shape: ChartShape) -> Self {
        match shape {
            ChartShape::Bar => ChartStyle::Bar {
                x_axis_title: "Transaction Type",
                y_axis_title: "Value",
                tick_angle: -45,
                tick_font_size: 10,
                marker_color: "blue",
            },
            ChartShape::Pie => ChartStyle::Pie { hole: 0.0 },
        }
    }
}

/// A chart description, ready to be drawn by a renderer
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub series: Vec<ChartPoint>,
    pub style: ChartStyle,
}

impl Chart {
    pub fn new(shape: ChartShape, series: Vec<ChartPoint>) -> Self {
        let title = match shape {
            ChartShape::Bar => "Transaction Types - Bar Chart",
            ChartShape::Pie => "Transaction Types - Pie Chart",
        };

        Self { title, series, style: ChartStyle::for_shape(shape) }
    }

    pub fn shape(&self) -> ChartShape {
        match self.style {
            ChartStyle::Bar { .. } => ChartShape::Bar,
            ChartStyle::Pie { .. } => ChartShape::Pie,
        }
    }

    /// Whether there's nothing to plot
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
