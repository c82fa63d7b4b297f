use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use transaction_dashboard::config::{Config, ConfigFile};
use transaction_dashboard::render::{OutputFormat, Renderer};
use transaction_dashboard::session::{Command, Response, Session, HELP};
use transaction_dashboard::{ChartShape, Dataset, Metric, Pipeline, Selection, TypeFilter};

static COMMAND_HISTORY_FILE: &str = ".transaction_dashboard_history";

/// A terminal dashboard over transaction counts and amounts
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the transaction CSV file
    #[clap(long)]
    dataset: Option<std::path::PathBuf>,
    /// A TOML file with `dataset`, `currency` and `width` settings
    #[clap(long)]
    config: Option<std::path::PathBuf>,
    /// The plotted metric: `txn` or `amount`
    #[clap(long, default_value = "txn")]
    metric: Metric,
    /// The shown transaction types, comma separated, or `all`
    #[clap(long, use_value_delimiter = true, default_value = "all")]
    types: Vec<String>,
    /// The chart type: `bar` (0) or `pie` (1)
    #[clap(long, default_value = "bar")]
    chart: ChartShape,
    /// The output format: `text` or `json`
    #[clap(long, default_value = "text")]
    format: OutputFormat,
    /// The terminal width text output is fitted into
    #[clap(long)]
    width: Option<usize>,
    /// Keep the dashboard open and change the selection with commands
    #[clap(short, long)]
    interactive: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let file = match &args.config {
        Some(path) => ConfigFile::load_from_file(path)?,
        None => ConfigFile::default(),
    };
    let overrides = ConfigFile {
        dataset: args.dataset.clone(),
        currency: None,
        width: args.width,
    };
    let config = Config::resolve(file, overrides);

    let dataset = Dataset::from_path(&config.dataset)
        .with_context(|| format!("Failed to load the dataset {:?}", config.dataset))?;
    let renderer = Renderer::new(args.format, config.currency, config.width);
    let selection = Selection::new(
        args.metric,
        TypeFilter::from_values(args.types.iter().map(|name| name.trim())),
        args.chart,
    );
    let mut session = Session::new(Pipeline::new(&dataset), selection);

    println!("{}", renderer.render(session.selection(), &session.frame())?);
    if args.interactive {
        run_interactive(&mut session, &renderer)?;
    }

    Ok(())
}

fn run_interactive(session: &mut Session, renderer: &Renderer) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    if rl.load_history(COMMAND_HISTORY_FILE).is_err() {
        log::debug!("No previous history");
    }
    println!("Type `help` for a list of commands");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(line.trim())?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        match session.dispatch(command) {
            Response::Frame(result) => println!("{}", renderer.render(session.selection(), &result)?),
            Response::Options(controls) => println!("{}", renderer.render_controls(&controls)?),
            Response::Help => println!("{}", HELP),
            Response::Quit => break,
        }
    }

    rl.save_history(COMMAND_HISTORY_FILE)?;
    Ok(())
}
