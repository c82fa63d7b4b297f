use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::TransactionRow;

/// The columns every dataset has to provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["transactiontypename", "txn", "amount"];

/// Possible errors to occur while loading a dataset
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("The dataset is missing the required column `{0}`")]
    MissingColumn(&'static str),
}

/// The immutable set of transaction rows the dashboard works on
///
/// A dataset is loaded once and then only ever handed out by reference.
/// There is no way to add, remove or change rows after loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<TransactionRow>,
}

impl Dataset {
    /// Creates a dataset from already parsed rows
    pub fn from_rows(rows: Vec<TransactionRow>) -> Self {
        Self { rows }
    }

    /// Loads a dataset from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        log::info!("Loading transaction dataset from {:?}", path);

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::from_csv(reader)
    }

    /// Loads a dataset from CSV data
    ///
    /// The data has to start with a header row naming at least the
    /// [`REQUIRED_COLUMNS`]. Additional columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let headers = reader.headers()?;
        if let Some(missing) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|header| header == *column))
        {
            return Err(DatasetError::MissingColumn(missing));
        }

        let rows = reader
            .deserialize()
            .collect::<Result<Vec<TransactionRow>, _>>()?;
        let dataset = Self { rows };
        log::info!(
            "Loaded {} rows covering {} transaction types",
            dataset.rows.len(),
            dataset.transaction_types().len(),
        );

        Ok(dataset)
    }

    /// All rows, in the order they were loaded
    pub fn rows(&self) -> &[TransactionRow] {
        &self.rows
    }

    /// The distinct transaction type names, in order of their first appearance
    pub fn transaction_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(TransactionRow::transaction_type_name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// The number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset holds no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
