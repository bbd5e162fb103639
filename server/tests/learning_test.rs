//! Integration tests for learning-path generation and listing.

use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Helper: start the server on a random port and return its base URL.
async fn start_test_server() -> String {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let data_dir = tmp_dir.path().to_str().unwrap().to_string();

    let db = nebula_server::db::init_db(&data_dir).expect("Failed to init DB");
    let jwt_secret = nebula_server::auth::jwt::load_or_generate_jwt_secret(&data_dir)
        .expect("Failed to generate JWT secret");
    let connections = nebula_server::ws::new_connection_registry();

    let state = nebula_server::state::AppState {
        db,
        jwt_secret,
        connections,
    };

    let app = nebula_server::routes::build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
        let _keep = tmp_dir;
    });

    format!("http://{}", addr)
}

/// Register a user and return an access token.
async fn register_user(base_url: &str, career_goal: &str) -> String {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "name": "Learner",
            "email": "learner@example.com",
            "password": "secret123",
            "careerGoal": career_goal,
            "educationLevel": "B.Tech",
            "learningStyle": "Kinesthetic",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "Registration failed");
    let body: serde_json::Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn generate_returns_the_requested_template() {
    let base_url = start_test_server().await;
    let token = register_user(&base_url, "AI Engineer").await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/learning-path/generate", base_url))
        .bearer_auth(&token)
        .json(&json!({ "careerGoal": "Data Scientist" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = resp.json().await.unwrap();

    assert_eq!(body["title"], "Data Science Professional Path");
    assert_eq!(body["progress"], 0);
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 7);
    assert_eq!(modules[0], "Statistics and Probability");
}

#[tokio::test]
async fn unknown_goal_falls_back_to_ai_engineer_template() {
    let base_url = start_test_server().await;
    let token = register_user(&base_url, "ML Engineer").await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/learning-path/generate", base_url))
        .bearer_auth(&token)
        .json(&json!({ "careerGoal": "Quantum Plumber" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "AI Engineering Mastery Path");
}

#[tokio::test]
async fn generated_paths_are_listed_newest_first() {
    let base_url = start_test_server().await;
    let token = register_user(&base_url, "AI Engineer").await;
    let client = reqwest::Client::new();

    for goal in ["ML Engineer", "Data Scientist"] {
        let resp = client
            .post(format!("{}/api/learning-path/generate", base_url))
            .bearer_auth(&token)
            .json(&json!({ "careerGoal": goal }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let resp = client
        .get(format!("{}/api/learning-path", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();

    let paths = body["learningPaths"].as_array().unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0]["title"], "Data Science Professional Path");
    assert_eq!(paths[1]["title"], "Machine Learning Engineering Path");
}

#[tokio::test]
async fn learning_path_routes_require_auth() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/learning-path/generate", base_url))
        .json(&json!({ "careerGoal": "Data Scientist" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(format!("{}/api/learning-path", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
