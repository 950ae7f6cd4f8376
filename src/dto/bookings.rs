use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Booking, EventSlot, PaymentMode};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub client_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    /// At least one scheduled event is required.
    pub events: Vec<EventSlot>,
    pub total_amount: i64,
    /// Optional advance collected at booking time; seeds the payment history.
    #[serde(default)]
    pub advance_paid: Option<i64>,
    #[serde(default)]
    pub advance_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
}

fn default_event_type() -> String {
    "Wedding".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub client_name: Option<String>,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub events: Option<Vec<EventSlot>>,
    pub total_amount: Option<i64>,
    pub advance_paid: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub amount: i64,
    pub mode: PaymentMode,
    /// Defaults to today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// The full filtered booking set plus its date-relative grouping. The four
/// groups partition `items`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingBoard {
    pub items: Vec<Booking>,
    pub today: Vec<Booking>,
    pub urgent: Vec<Booking>,
    pub upcoming: Vec<Booking>,
    pub past: Vec<Booking>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub todays_shoots: usize,
    /// Sum of outstanding balances across all bookings.
    pub pending_amount: i64,
    pub completed: usize,
    pub total_bookings: usize,
}
