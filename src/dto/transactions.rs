use serde::Serialize;
use utoipa::ToSchema;

use crate::{domain::ledger::LedgerSummary, models::Transaction};

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionList {
    pub items: Vec<Transaction>,
    /// Count and sum over the filtered set, not the full ledger.
    pub summary: LedgerSummary,
}
