pub mod auth;
pub mod bookings;
pub mod clients;
pub mod transactions;
