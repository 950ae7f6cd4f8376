use crate::{
    domain::clients,
    dto::clients::ClientDirectory,
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    services::booking_service,
    state::AppState,
};

pub async fn list_clients(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<ClientDirectory>> {
    let bookings = booking_service::load_snapshot(state).await?;

    // Directory stats cover every client; the search only narrows the list.
    let all = clients::aggregate(&bookings, None);
    let total_clients = all.len();
    let average_value = clients::average_contract_value(&bookings, total_clients);

    let filtered = clients::aggregate(&bookings, query.q.as_deref());
    let meta = Meta::count(filtered.len() as i64);
    let directory = ClientDirectory {
        clients: filtered,
        total_clients,
        average_value,
    };
    Ok(ApiResponse::success("Clients", directory, Some(meta)))
}
