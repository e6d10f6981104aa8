use pledgeboard::{config::Config, create_app, db, settings, AppState};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::Level;

#[tokio::test]
async fn test_main_server_startup() {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .try_init();

    let db = db::connect("sqlite::memory:").await.unwrap();
    settings::ensure_settings(&db).await.unwrap();
    let app = create_app(AppState::new(db, Config::default()));

    // Port 0 lets the OS pick a free port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Start the server in a separate task
    let server_task: JoinHandle<()> = tokio::spawn(async move {
        tracing::info!("Test server running on http://{}", addr);
        axum::serve(listener, app).await.unwrap();
    });

    // Wait a moment for the server to start up
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::new();
    let health = client
        .get(format!("http://{}/api/health", addr))
        .send()
        .await
        .expect("Failed to connect to test server");
    let health_status = health.status();
    let health_body: serde_json::Value = health.json().await.unwrap();
    let state: serde_json::Value = client
        .get(format!("http://{}/api/state", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Cancel the server task after we've made our test requests
    server_task.abort();

    assert!(health_status.is_success());
    assert_eq!(health_body["ok"], true);
    assert_eq!(state["goal"], 3500);
}
