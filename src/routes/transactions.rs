use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::transactions::TransactionList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::transaction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_transactions))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(("q" = Option<String>, Query, description = "Filter by client or payment mode")),
    responses((status = 200, description = "Global payment ledger", body = ApiResponse<TransactionList>)),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<TransactionList>>> {
    let resp = transaction_service::list_transactions(&state, query).await?;
    Ok(Json(resp))
}
