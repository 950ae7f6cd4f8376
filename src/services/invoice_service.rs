use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::invoice,
    error::{AppError, AppResult},
    models::Invoice,
    response::{ApiResponse, Meta},
    services::booking_service,
    state::AppState,
};

/// Assemble the invoice view-model for one booking. The invoice number is
/// minted fresh on every call; derived amounts are copied from the booking.
pub async fn generate_invoice(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Invoice>> {
    let booking = booking_service::get_booking(state, id).await?;
    if booking.events.is_empty() {
        return Err(AppError::Render(
            "booking has no scheduled events to bill".into(),
        ));
    }

    let now = Utc::now();
    let invoice_no = invoice::invoice_number(now.timestamp_millis());
    let assembled = invoice::assemble(
        &booking,
        &state.config.studio_name,
        &state.config.business_details,
        invoice_no,
        now.date_naive(),
    );

    Ok(ApiResponse::success(
        "Invoice assembled",
        assembled,
        Some(Meta::empty()),
    ))
}
