use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ClientSummary;

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDirectory {
    pub clients: Vec<ClientSummary>,
    /// Distinct clients across the whole booking set, ignoring the filter.
    pub total_clients: usize,
    /// Mean contracted amount per client, whole currency units.
    pub average_value: i64,
}
