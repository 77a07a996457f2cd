use axum::Router;
use punchlist_store::StoreConfig;
use tokio::net::TcpListener;

/// Build a test router with an in-memory SQLite store and a temp-dir local
/// attachment store.
pub fn test_router() -> Router {
    let db = punchlist_db::Db::open_in_memory().unwrap();
    let store_config = StoreConfig {
        endpoint_url: punchlist_store::DEFAULT_ENDPOINT.into(),
        region: punchlist_store::DEFAULT_REGION.into(),
        bucket: punchlist_store::DEFAULT_BUCKET.into(),
        access_key: None,
        secret_key: None,
        public_base: None,
        local_data_dir: Some(
            tempfile::tempdir()
                .unwrap()
                .keep()
                .to_string_lossy()
                .to_string(),
        ),
    };
    let store = punchlist_store::create_store(&store_config).unwrap();
    crate::routes::build_router(db, store)
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn an in-process server on a random port. Returns the TestServer
/// with the `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let app = test_router();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
