use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use tankwatch::{routes, Config, Notifier, TelemetryState};

#[derive(Debug, Deserialize)]
struct Status {
    distance: f64,
    level: f64,
    rssi: i32,
    time: String,
    #[serde(rename = "lastSeen")]
    last_seen: i64,
    online: bool,
}

fn test_config() -> Config {
    // ---
    // Empty credentials keep the notifier disabled, so no traffic leaves
    // the test process.
    Config {
        bot_token: String::new(),
        chat_id: String::new(),
        low_threshold: 20.0,
        high_threshold: 90.0,
        cooldown_ms: 60_000,
        port: 0,
        tz_offset_hours: 0,
    }
}

/// Bind the full router on an ephemeral local port and return its base URL.
async fn spawn_app() -> Result<String> {
    // ---
    let cfg = test_config();
    let state = TelemetryState::shared(&cfg);
    let notifier = Notifier::from_config(&cfg);
    let app = routes::router(state, notifier);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn update_then_status_round_trip() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/update", base))
        .json(&json!({ "distance": 41.5, "level": 63.0, "rssi": -71 }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["success"], json!(true));

    let status: Status = client
        .get(format!("{}/api/status", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(status.distance, 41.5);
    assert_eq!(status.level, 63.0);
    assert_eq!(status.rssi, -71);
    assert!(status.last_seen > 0, "lastSeen should be stamped");
    assert!(!status.time.is_empty(), "display time should be set");
    assert!(status.online, "a fresh reading should count as online");

    Ok(())
}

#[tokio::test]
async fn missing_level_is_rejected_without_mutation() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/update", base))
        .json(&json!({ "distance": 12.5 }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await?;
    assert_eq!(body["error"], json!("Missing data"));

    // State untouched: still the zero reading and an empty history.
    let status: Status = client
        .get(format!("{}/api/status", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status.last_seen, 0);
    assert!(!status.online);

    let history: Vec<Value> = client
        .get(format!("{}/api/history", base))
        .send()
        .await?
        .json()
        .await?;
    assert!(history.is_empty());

    Ok(())
}

#[tokio::test]
async fn rssi_defaults_when_absent() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/update", base))
        .json(&json!({ "distance": 10.0, "level": 55.0 }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let status: Status = client
        .get(format!("{}/api/status", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status.rssi, -100);

    Ok(())
}

#[tokio::test]
async fn history_accumulates_in_order() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    for level in [30.0, 40.0, 50.0] {
        let response = client
            .post(format!("{}/api/update", base))
            .json(&json!({ "distance": 10.0, "level": level }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let history: Vec<Value> = client
        .get(format!("{}/api/history", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(history.len(), 3);
    let values: Vec<f64> = history
        .iter()
        .map(|p| p["v"].as_f64().expect("v should be a number"))
        .collect();
    assert_eq!(values, vec![30.0, 40.0, 50.0]);

    for point in &history {
        assert!(point["t"].is_string(), "t should be a minute label");
    }

    Ok(())
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let response = client.get(format!("{}/health", base)).send().await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["status"], json!("ok"));

    Ok(())
}
