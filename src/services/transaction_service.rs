use crate::{
    domain::ledger,
    dto::transactions::TransactionList,
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    services::booking_service,
    state::AppState,
};

pub async fn list_transactions(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<TransactionList>> {
    let bookings = booking_service::load_snapshot(state).await?;

    let all = ledger::extract(&bookings);
    let items = ledger::filter(&all, query.q.as_deref());
    let summary = ledger::summarize(&items);

    let meta = Meta::count(items.len() as i64);
    let list = TransactionList { items, summary };
    Ok(ApiResponse::success("Transactions", list, Some(meta)))
}
