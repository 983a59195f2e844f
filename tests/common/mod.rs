// tests/common/mod.rs

use quizdeck::{config::Config, routes, session::Sessions, state::AppState, store::JsonStore};

/// A running test instance. Holds the temp data directory so it outlives
/// the requests made against the app.
pub struct TestApp {
    pub address: String,
    _data_dir: tempfile::TempDir,
}

/// Spawns the app on a random port with an isolated data directory.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(false).await
}

/// Same, but with the sole-user auto-login recovery switched on.
pub async fn spawn_app_with(single_user_auto_login: bool) -> TestApp {
    // 1. Isolated collections per test
    let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");

    let config = Config {
        data_dir: data_dir.path().to_path_buf(),
        rust_log: "error".to_string(),
        single_user_auto_login,
    };

    let store = JsonStore::open(&config.data_dir).expect("Failed to open test store");

    // 2. Create test state and router
    let state = AppState {
        store,
        sessions: Sessions::new(),
        config,
    };
    let app = routes::create_router(state);

    // 3. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 4. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        _data_dir: data_dir,
    }
}

/// Registers a user and returns the session token.
pub async fn register_user(
    client: &reqwest::Client,
    address: &str,
    username: &str,
    email: &str,
    password: &str,
) -> String {
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.expect("Invalid register body");
    body["token"].as_str().expect("Missing token").to_string()
}

/// Creates a one-question quiz ("Geo") and returns its id.
pub async fn create_geo_quiz(client: &reqwest::Client, address: &str, token: &str) -> String {
    let response = client
        .post(format!("{}/api/quizzes", address))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "title": "Geo",
            "description": "One capital",
            "questions": [{
                "text": "Capital of France?",
                "choices": ["Paris", "Lyon", "Nice", "Dijon"],
                "correct_index": 0
            }]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.expect("Invalid quiz body");
    body["id"].as_str().expect("Missing quiz id").to_string()
}
