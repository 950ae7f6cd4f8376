use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    sync::SnapshotHub,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: AppConfig,
    pub snapshots: SnapshotHub,
}
