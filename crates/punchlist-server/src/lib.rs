pub mod routes;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use punchlist_db::Db;
use punchlist_store::ObjectStore;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, db: Db, store: Arc<dyn ObjectStore>) -> Result<()> {
    let app = routes::build_router(db, store);
    axum::serve(listener, app).await?;
    Ok(())
}
