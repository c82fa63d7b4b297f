use fixed::types::I64F64;
use serde::Deserialize;

/// The number of transactions recorded for a row
pub type TxnCount = u64;

/// A monetary amount
///
/// Amounts are kept as fixed point decimals, so sums over the dataset don't
/// accumulate floating point error before they're formatted.
pub type Amount = I64F64;

/// One record of the transaction dataset
#[derive(Clone, Debug, serde::Deserialize, PartialEq, Eq)]
pub struct TransactionRow {
    #[serde(rename = "transactiontypename")]
    transaction_type_name: String,
    #[serde(rename = "txn", deserialize_with = "deserialize_txn_count")]
    txn_count: TxnCount,
    amount: Amount,
}

impl TransactionRow {
    /// Creates a new row
    pub fn new(transaction_type_name: impl Into<String>, txn_count: TxnCount, amount: Amount) -> Self {
        Self {
            transaction_type_name: transaction_type_name.into(),
            txn_count,
            amount,
        }
    }

    /// The name of the transaction type this row is for
    pub fn transaction_type_name(&self) -> &str {
        &self.transaction_type_name
    }

    /// The number of transactions
    pub fn txn_count(&self) -> TxnCount {
        self.txn_count
    }

    /// The transaction amount
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Reads a transaction count from a cell
///
/// Counts may be written as integral decimals, e.g. `1200.0`, but have to be
/// whole and non negative.
fn deserialize_txn_count<'de, D>(deserializer: D) -> Result<TxnCount, D::Error>
    where D: serde::Deserializer<'de>
{
    let raw = String::deserialize(deserializer)?;
    let cell = raw.trim();

    if let Ok(count) = cell.parse::<TxnCount>() {
        return Ok(count);
    }
    match cell.parse::<f64>() {
        Ok(count) if count.fract() == 0.0 && count >= 0.0 && count <= TxnCount::MAX as f64 => {
            Ok(count as TxnCount)
        }
        _ => Err(serde::de::Error::custom(format!(
            "expected a non negative whole number of transactions, got `{cell}`"
        ))),
    }
}
