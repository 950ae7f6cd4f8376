use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post, put},
};
use tokio_stream::{
    Stream, StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};
use uuid::Uuid;

use crate::{
    dto::bookings::{
        BookingBoard, CreateBookingRequest, DashboardSummary, RecordPaymentRequest,
        UpdateBookingRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Booking, Invoice},
    response::ApiResponse,
    routes::params::SearchQuery,
    services::{booking_service, invoice_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/summary", get(dashboard_summary))
        .route("/stream", get(stream_bookings))
        .route("/{id}", put(update_booking).delete(delete_booking))
        .route("/{id}/payments", post(record_payment))
        .route("/{id}/invoice", get(generate_invoice))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(("q" = Option<String>, Query, description = "Filter by client name")),
    responses((status = 200, description = "Bookings grouped by schedule bucket", body = ApiResponse<BookingBoard>)),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<BookingBoard>>> {
    let resp = booking_service::list_bookings(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/summary",
    responses((status = 200, description = "Dashboard stats", body = ApiResponse<DashboardSummary>)),
    tag = "Bookings"
)]
pub async fn dashboard_summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let resp = booking_service::dashboard_summary(&state).await?;
    Ok(Json(resp))
}

/// Live snapshot channel: one full-replacement `snapshot` event on
/// subscribe, then one per committed mutation. Closing the connection is
/// the unsubscribe.
#[utoipa::path(
    get,
    path = "/api/bookings/stream",
    responses((status = 200, description = "SSE stream of full booking snapshots")),
    tag = "Bookings"
)]
pub async fn stream_bookings(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    // Subscribe before the initial load so no mutation lands unseen
    // between the two.
    let rx = state.snapshots.subscribe();
    let initial = booking_service::load_snapshot(&state).await?;

    let first = tokio_stream::once(Ok::<Event, Infallible>(snapshot_event(&initial)));
    let updates = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(snapshot) => Some(Ok(snapshot_event(&snapshot))),
        // A lagged subscriber just waits for the next full snapshot.
        Err(BroadcastStreamRecvError::Lagged(_)) => None,
    });

    Ok(Sse::new(first.chain(updates)).keep_alive(KeepAlive::default()))
}

fn snapshot_event(bookings: &[Booking]) -> Event {
    let payload = serde_json::to_string(bookings).unwrap_or_else(|_| "[]".to_string());
    Event::default().event("snapshot").data(payload)
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = ApiResponse<Booking>),
        (status = 400, description = "Missing required fields")
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::create_booking(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<Booking>),
        (status = 404, description = "Unknown booking")
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::update_booking(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/payments",
    request_body = RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<Booking>),
        (status = 400, description = "Non-positive amount")
    ),
    tag = "Bookings"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = booking_service::record_payment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 404, description = "Unknown booking")
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = booking_service::delete_booking(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}/invoice",
    responses(
        (status = 200, description = "Invoice view-model", body = ApiResponse<Invoice>),
        (status = 404, description = "Unknown booking")
    ),
    tag = "Invoices"
)]
pub async fn generate_invoice(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let resp = invoice_service::generate_invoice(&state, id).await?;
    Ok(Json(resp))
}
