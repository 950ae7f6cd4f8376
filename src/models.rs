use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub role: String,
}

/// Payment lifecycle state, a pure function of `(total_amount, advance_paid)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Advance,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Advance => "advance",
            PaymentStatus::Paid => "paid",
        }
    }

    /// Parse a stored status string; unknown values fall back to pending.
    pub fn parse(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            "advance" => PaymentStatus::Advance,
            _ => PaymentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentMode {
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
            PaymentMode::BankTransfer => "Bank Transfer",
        }
    }
}

/// Date-relative display grouping for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Today,
    Urgent,
    Upcoming,
    Past,
}

/// One scheduled function (Haldi, Reception, ...) within a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventSlot {
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub function_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentRecord {
    pub amount: i64,
    pub date: NaiveDate,
    pub mode: PaymentMode,
}

/// A photography engagement with its schedule and payment plan.
///
/// The `events` sequence is the single source of truth for scheduling; the
/// top-level `event_date`/`event_time`/`location` fields are the primary
/// (first) event, filled in on read for display compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub client_name: String,
    pub phone: String,
    pub event_type: String,
    pub events: Vec<EventSlot>,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub total_amount: i64,
    pub advance_paid: i64,
    pub balance: i64,
    pub payment_history: Vec<PaymentRecord>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn primary_event(&self) -> Option<&EventSlot> {
        self.events.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecentEvent {
    pub event_type: String,
    pub event_date: NaiveDate,
}

/// Per-client rollup derived from the full booking set; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientSummary {
    pub name: String,
    pub phone: String,
    pub total_bookings: usize,
    /// Gross contracted amount across all bookings, not amount collected.
    pub total_spent: i64,
    pub last_booking_date: NaiveDate,
    pub recent_events: Vec<RecentEvent>,
}

/// One payment-history entry flattened into the global ledger view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Synthesized from booking id, date, and amount; two identical
    /// same-day payments on one booking collide (known limitation).
    pub id: String,
    pub client_name: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub mode: PaymentMode,
}

/// Invoice view-model handed to the rendering collaborator. Derived amounts
/// are copied from the booking, never recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub studio_name: String,
    pub business_details: String,
    pub client_name: String,
    pub client_phone: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub balance: i64,
    pub status: PaymentStatus,
    pub events: Vec<EventSlot>,
    pub payment_history: Vec<PaymentRecord>,
    pub invoice_no: String,
    pub invoice_date: NaiveDate,
    pub file_name: String,
    pub whatsapp_link: Option<String>,
}
