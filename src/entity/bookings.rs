use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub client_name: String,
    pub phone: String,
    pub event_type: String,
    /// Ordered event slots; the first entry is the primary event.
    pub events: Json,
    pub total_amount: i64,
    pub advance_paid: i64,
    pub balance: i64,
    /// Append-only payment records.
    pub payment_history: Json,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
