use std::str::FromStr;

use crate::controls::Controls;
use crate::{AggregateResult, ChartShape, Metric, Pipeline, Selection, SelectionError, TypeFilter};

pub const HELP: &str = "\
Commands:
  metric <txn|amount>        plot transaction counts or amounts
  types all                  show every transaction type
  types <type>, <type>, ...  only show the listed transaction types
  types                      show no transaction types
  chart <bar|pie|0|1>        switch between bar and pie chart
  show                       render the current selection again
  options                    list the options of every control
  help                       show this help
  quit                       leave the dashboard";

/// Possible errors to occur while parsing a command
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Unknown command `{0}`, type `help` for a list of commands")]
    Unknown(String),
    #[error("The `{0}` command needs an argument")]
    MissingArgument(&'static str),
    #[error("The `{0}` command takes no argument")]
    UnexpectedArgument(&'static str),
}

/// One user interaction with the dashboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Metric(Metric),
    Types(TypeFilter),
    Chart(ChartShape),
    Show,
    Options,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (keyword, argument) = s
            .split_once(char::is_whitespace)
            .map(|(keyword, argument)| (keyword, argument.trim()))
            .unwrap_or((s, ""));

        let no_argument = |name: &'static str, command: Command| match argument.is_empty() {
            true => Ok(command),
            false => Err(CommandError::UnexpectedArgument(name)),
        };

        match keyword.to_ascii_lowercase().as_str() {
            "metric" if argument.is_empty() => Err(CommandError::MissingArgument("metric")),
            "metric" => Ok(Command::Metric(argument.parse()?)),
            "chart" if argument.is_empty() => Err(CommandError::MissingArgument("chart")),
            "chart" => Ok(Command::Chart(argument.parse()?)),
            // type names may contain spaces, so they're separated by commas
            "types" => Ok(Command::Types(TypeFilter::from_values(
                argument
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty()),
            ))),
            "show" => no_argument("show", Command::Show),
            "options" => no_argument("options", Command::Options),
            "help" => no_argument("help", Command::Help),
            "quit" | "exit" => no_argument("quit", Command::Quit),
            _ => Err(CommandError::Unknown(s.to_string())),
        }
    }
}

/// What the dashboard shows in response to a command
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// A freshly computed frame for the current selection
    Frame(AggregateResult),
    Options(Controls),
    Help,
    Quit,
}

/// An interactive dashboard session
///
/// The session owns the current selection. Every command changing the
/// selection recomputes the result right away, superseding the previous one.
#[derive(Debug)]
pub struct Session<'a> {
    pipeline: Pipeline<'a>,
    selection: Selection,
}

impl<'a> Session<'a> {
    pub fn new(pipeline: Pipeline<'a>, selection: Selection) -> Self {
        Self { pipeline, selection }
    }

    /// The current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Computes the frame for the current selection
    pub fn frame(&self) -> AggregateResult {
        self.pipeline.compute(&self.selection)
    }

    /// Applies a command to the session
    pub fn dispatch(&mut self, command: Command) -> Response {
        match command {
            Command::Metric(metric) => self.selection.metric = metric,
            Command::Types(type_filter) => self.selection.type_filter = type_filter,
            Command::Chart(chart_shape) => self.selection.chart_shape = chart_shape,
            Command::Show => {}
            Command::Options => return Response::Options(Controls::for_dataset(self.pipeline.dataset())),
            Command::Help => return Response::Help,
            Command::Quit => return Response::Quit,
        }

        log::debug!("Selection changed to {}", self.selection);
        Response::Frame(self.frame())
    }
}
