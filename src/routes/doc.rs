use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::ledger::LedgerSummary,
    dto::{
        bookings::{
            BookingBoard, CreateBookingRequest, DashboardSummary, RecordPaymentRequest,
            UpdateBookingRequest,
        },
        clients::ClientDirectory,
        transactions::TransactionList,
    },
    models::{
        Booking, ClientSummary, EventSlot, Invoice, PaymentMode, PaymentRecord, PaymentStatus,
        Transaction, User,
    },
    response::{ApiResponse, Meta},
    routes::{auth, bookings, clients, health, params, transactions},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        bookings::list_bookings,
        bookings::dashboard_summary,
        bookings::stream_bookings,
        bookings::create_booking,
        bookings::update_booking,
        bookings::record_payment,
        bookings::delete_booking,
        bookings::generate_invoice,
        clients::list_clients,
        transactions::list_transactions
    ),
    components(
        schemas(
            User,
            Booking,
            EventSlot,
            PaymentRecord,
            PaymentMode,
            PaymentStatus,
            ClientSummary,
            Transaction,
            Invoice,
            BookingBoard,
            DashboardSummary,
            CreateBookingRequest,
            UpdateBookingRequest,
            RecordPaymentRequest,
            ClientDirectory,
            TransactionList,
            LedgerSummary,
            params::SearchQuery,
            Meta,
            ApiResponse<Booking>,
            ApiResponse<BookingBoard>,
            ApiResponse<DashboardSummary>,
            ApiResponse<ClientDirectory>,
            ApiResponse<TransactionList>,
            ApiResponse<Invoice>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Bookings", description = "Booking list, mutations, and live snapshot stream"),
        (name = "Clients", description = "Per-client rollups derived from bookings"),
        (name = "Transactions", description = "Flattened payment ledger"),
        (name = "Invoices", description = "Invoice view-model assembly"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
