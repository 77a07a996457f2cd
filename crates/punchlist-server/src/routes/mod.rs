pub mod files;
pub mod health;
pub mod items;

use std::sync::Arc;

use axum::Router;
use punchlist_db::Db;
use punchlist_store::ObjectStore;

pub struct InnerAppState {
    pub db: Db,
    pub store: Arc<dyn ObjectStore>,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(db: Db, store: Arc<dyn ObjectStore>) -> Router {
    let state: AppState = Arc::new(InnerAppState { db, store });

    Router::new()
        .merge(items::routes())
        .merge(files::routes())
        .merge(health::routes())
        .with_state(state)
}
