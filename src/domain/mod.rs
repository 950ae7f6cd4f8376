pub mod clients;
pub mod invoice;
pub mod ledger;
pub mod lifecycle;
