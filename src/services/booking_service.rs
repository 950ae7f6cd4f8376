use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    domain::lifecycle,
    dto::bookings::{
        BookingBoard, CreateBookingRequest, DashboardSummary, RecordPaymentRequest,
        UpdateBookingRequest,
    },
    entity::bookings::{
        ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings,
        Model as BookingModel,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Booking, Bucket, EventSlot, PaymentMode, PaymentRecord, PaymentStatus},
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    state::AppState,
};

/// Full current booking set, newest first; the unit the snapshot hub
/// pushes to live subscribers.
pub async fn load_snapshot(state: &AppState) -> AppResult<Vec<Booking>> {
    Bookings::find()
        .order_by_desc(BookingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect()
}

pub async fn list_bookings(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<BookingBoard>> {
    let bookings = load_snapshot(state).await?;

    let filtered: Vec<Booking> = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    {
        Some(q) => {
            let q = q.to_lowercase();
            bookings
                .into_iter()
                .filter(|b| b.client_name.to_lowercase().contains(&q))
                .collect()
        }
        None => bookings,
    };

    let today = Utc::now().date_naive();
    let mut board = BookingBoard {
        items: filtered.clone(),
        today: Vec::new(),
        urgent: Vec::new(),
        upcoming: Vec::new(),
        past: Vec::new(),
    };
    for booking in filtered {
        match lifecycle::classify_bucket(booking.event_date, today) {
            Bucket::Today => board.today.push(booking),
            Bucket::Urgent => board.urgent.push(booking),
            Bucket::Upcoming => board.upcoming.push(booking),
            Bucket::Past => board.past.push(booking),
        }
    }
    board.upcoming.sort_by_key(|b| b.event_date);
    board.past.sort_by(|a, b| b.event_date.cmp(&a.event_date));

    let meta = Meta::count(board.items.len() as i64);
    Ok(ApiResponse::success("Ok", board, Some(meta)))
}

pub async fn dashboard_summary(state: &AppState) -> AppResult<ApiResponse<DashboardSummary>> {
    let bookings = load_snapshot(state).await?;
    let today = Utc::now().date_naive();

    let summary = DashboardSummary {
        todays_shoots: bookings
            .iter()
            .filter(|b| lifecycle::classify_bucket(b.event_date, today) == Bucket::Today)
            .count(),
        pending_amount: bookings.iter().map(|b| b.balance).sum(),
        completed: bookings
            .iter()
            .filter(|b| b.status == PaymentStatus::Paid)
            .count(),
        total_bookings: bookings.len(),
    };
    Ok(ApiResponse::success("Ok", summary, Some(Meta::empty())))
}

pub async fn create_booking(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError::BadRequest("Client name is required".into()));
    }
    if payload.events.is_empty() {
        return Err(AppError::BadRequest(
            "At least one event date is required".into(),
        ));
    }
    if payload.total_amount <= 0 {
        return Err(AppError::BadRequest("Total amount is required".into()));
    }
    let advance = payload.advance_paid.unwrap_or(0);
    if advance < 0 {
        return Err(AppError::BadRequest("Advance cannot be negative".into()));
    }

    // A non-zero advance seeds the payment history with its first entry.
    let mut payment_history: Vec<PaymentRecord> = Vec::new();
    if advance > 0 {
        payment_history.push(PaymentRecord {
            amount: advance,
            date: payload.advance_date.unwrap_or_else(|| Utc::now().date_naive()),
            mode: payload.payment_mode.unwrap_or(PaymentMode::Cash),
        });
    }

    let (balance, status) = lifecycle::settle(payload.total_amount, advance);

    let active = BookingActive {
        id: Set(Uuid::new_v4()),
        client_name: Set(payload.client_name),
        phone: Set(payload.phone),
        event_type: Set(payload.event_type),
        events: Set(serde_json::to_value(&payload.events)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?),
        total_amount: Set(payload.total_amount),
        advance_paid: Set(advance),
        balance: Set(balance),
        payment_history: Set(serde_json::to_value(&payment_history)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?),
        status: Set(status.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let booking = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "booking_create",
        "bookings",
        serde_json::json!({ "booking_id": booking.id }),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let booking = booking_from_entity(booking)?;
    publish_snapshot(state).await;
    Ok(ApiResponse::success(
        "Booking created",
        booking,
        Some(Meta::empty()),
    ))
}

pub async fn update_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    let existing = Bookings::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    if let Some(events) = payload.events.as_ref() {
        if events.is_empty() {
            return Err(AppError::BadRequest(
                "A booking must keep at least one event".into(),
            ));
        }
    }

    let total_amount = payload.total_amount.unwrap_or(existing.total_amount);
    let advance_paid = payload.advance_paid.unwrap_or(existing.advance_paid);
    if total_amount < 0 || advance_paid < 0 {
        return Err(AppError::BadRequest("Amounts cannot be negative".into()));
    }
    // Edits flow through the same recompute entry point as payments, so
    // the stored derived fields can never drift from the amounts.
    let (balance, status) = lifecycle::settle(total_amount, advance_paid);

    let mut active: BookingActive = existing.into();
    if let Some(client_name) = payload.client_name {
        active.client_name = Set(client_name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(event_type) = payload.event_type {
        active.event_type = Set(event_type);
    }
    if let Some(events) = payload.events {
        active.events = Set(serde_json::to_value(&events)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?);
    }
    active.total_amount = Set(total_amount);
    active.advance_paid = Set(advance_paid);
    active.balance = Set(balance);
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let booking = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "booking_update",
        "bookings",
        serde_json::json!({ "booking_id": booking.id }),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let booking = booking_from_entity(booking)?;
    publish_snapshot(state).await;
    Ok(ApiResponse::success(
        "Booking updated",
        booking,
        Some(Meta::empty()),
    ))
}

pub async fn record_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RecordPaymentRequest,
) -> AppResult<ApiResponse<Booking>> {
    let existing = Bookings::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let booking = booking_from_entity(existing.clone())?;
    let date = payload.date.unwrap_or_else(|| Utc::now().date_naive());
    let booking = lifecycle::apply_payment(booking, payload.amount, payload.mode, date)?;

    // One UPDATE carries history, advance, balance, and status together;
    // row-level atomicity keeps the derived fields coherent.
    let mut active: BookingActive = existing.into();
    active.advance_paid = Set(booking.advance_paid);
    active.balance = Set(booking.balance);
    active.status = Set(booking.status.as_str().to_string());
    active.payment_history = Set(serde_json::to_value(&booking.payment_history)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "booking_payment",
        "bookings",
        serde_json::json!({
            "booking_id": id,
            "amount": payload.amount,
            "mode": payload.mode.as_str(),
        }),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let booking = booking_from_entity(updated)?;
    publish_snapshot(state).await;
    Ok(ApiResponse::success(
        "Payment recorded",
        booking,
        Some(Meta::empty()),
    ))
}

pub async fn get_booking(state: &AppState, id: Uuid) -> AppResult<Booking> {
    let booking = Bookings::find_by_id(id).one(&state.orm).await?;
    match booking {
        Some(b) => booking_from_entity(b),
        None => Err(AppError::NotFound),
    }
}

pub async fn delete_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Bookings::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "booking_delete",
        "bookings",
        serde_json::json!({ "booking_id": id }),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    publish_snapshot(state).await;
    Ok(ApiResponse::success(
        "Booking deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

/// Push the fresh full set to live subscribers. The mutation already
/// committed, so a failed reload only logs.
async fn publish_snapshot(state: &AppState) {
    match load_snapshot(state).await {
        Ok(bookings) => {
            state.snapshots.publish(bookings);
        }
        Err(err) => {
            tracing::warn!(error = %err, "snapshot publish failed");
        }
    }
}

pub(crate) fn booking_from_entity(model: BookingModel) -> AppResult<Booking> {
    let events: Vec<EventSlot> = serde_json::from_value(model.events)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt events column: {e}")))?;
    let payment_history: Vec<PaymentRecord> = serde_json::from_value(model.payment_history)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt payment history: {e}")))?;

    // The primary event is the first slot; a legacy row with no events
    // falls back to its creation date for display grouping.
    let (event_date, event_time, location) = match events.first() {
        Some(ev) => (ev.date, ev.time.clone(), ev.location.clone()),
        None => (model.created_at.date_naive(), String::new(), String::new()),
    };

    Ok(Booking {
        id: model.id,
        client_name: model.client_name,
        phone: model.phone,
        event_type: model.event_type,
        events,
        event_date,
        event_time,
        location,
        total_amount: model.total_amount,
        advance_paid: model.advance_paid,
        balance: model.balance,
        payment_history,
        status: PaymentStatus::parse(&model.status),
        created_at: model.created_at.with_timezone(&Utc),
    })
}
