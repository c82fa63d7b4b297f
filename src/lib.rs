pub use self::{
    chart::{Chart, ChartPoint, ChartStyle},
    dataset::{Dataset, DatasetError},
    pipeline::{compute, AggregateResult, Pipeline},
    row::{Amount, TransactionRow, TxnCount},
    selection::{ChartShape, Metric, Selection, SelectionError, TypeFilter},
};

pub mod config;
pub mod controls;
pub mod format;
pub mod render;
pub mod session;

mod chart;
mod dataset;
mod pipeline;
mod row;
mod selection;
