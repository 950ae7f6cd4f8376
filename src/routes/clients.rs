use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::clients::ClientDirectory,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::client_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_clients))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    params(("q" = Option<String>, Query, description = "Filter by name or phone")),
    responses((status = 200, description = "Client directory", body = ApiResponse<ClientDirectory>)),
    tag = "Clients"
)]
pub async fn list_clients(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<ClientDirectory>>> {
    let resp = client_service::list_clients(&state, query).await?;
    Ok(Json(resp))
}
