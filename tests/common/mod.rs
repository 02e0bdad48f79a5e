//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use jobpulse::config::TrackerConfig;
use jobpulse::http::HttpServer;
use jobpulse::lifecycle::Shutdown;
use jobpulse::store::memory::MemoryStore;
use jobpulse::store::CounterStore;

/// Config with fast windows and metrics disabled, for tests to tweak.
pub fn test_config() -> TrackerConfig {
    let mut config = TrackerConfig::default();
    config.observability.metrics_enabled = false;
    config
}

/// Memory store seeded with the fixtures the tests rely on.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_job("job-1", 10, 4);
    store.insert_job("job-2", 0, 0);
    store.insert_exam("exam-1", 2);
    store
}

/// Start the tracking server on an ephemeral port.
///
/// Returns the bound address and the shutdown handle; trigger it at the
/// end of the test to stop the server and its background tasks.
pub async fn spawn_server(config: TrackerConfig, store: Arc<MemoryStore>) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let dyn_store: Arc<dyn CounterStore> = store;
    let server = HttpServer::new(config, dyn_store);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the listener a beat to start accepting.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
