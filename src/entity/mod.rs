pub mod audit_logs;
pub mod bookings;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use bookings::Entity as Bookings;
pub use users::Entity as Users;
