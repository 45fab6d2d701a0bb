mod enriched;
mod errors;
mod page;
mod transaction;

use serde::{Deserialize, Serialize};

pub use enriched::EnrichedTransaction;
pub use errors::ValidationError;
pub use page::{PageInfo, PageSummary, TransactionPage};
pub use transaction::Transaction;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    #[serde(alias = "credit")]
    Credit,
    #[serde(alias = "debit")]
    Debit
}
