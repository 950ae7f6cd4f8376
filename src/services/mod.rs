pub mod auth_service;
pub mod booking_service;
pub mod client_service;
pub mod invoice_service;
pub mod transaction_service;
