//! Integration tests for the REST mentor chat.

use nebula_server::accounts::profile::CareerGoal;
use nebula_server::mentor::responder;
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

/// Register a user with the given career goal and return an access token.
async fn register_user(base_url: &str, career_goal: &str) -> String {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "name": "Asker",
            "email": "asker@example.com",
            "password": "secret123",
            "careerGoal": career_goal,
            "educationLevel": "Diploma",
            "learningStyle": "Auditory",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201, "Registration failed");
    let body: serde_json::Value = resp.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn mentor_replies_come_from_the_callers_career_goal_list() {
    let base_url = start_test_server().await;
    let token = register_user(&base_url, "Data Scientist").await;
    let client = reqwest::Client::new();

    let expected = responder::replies_for(CareerGoal::DataScientist);

    for _ in 0..10 {
        let resp = client
            .post(format!("{}/api/chat/mentor", base_url))
            .bearer_auth(&token)
            .json(&json!({ "message": "what should I learn next?" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = resp.json().await.unwrap();

        let reply = body["response"].as_str().unwrap();
        assert!(expected.contains(&reply), "unexpected reply: {}", reply);
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let base_url = start_test_server().await;
    let token = register_user(&base_url, "AI Engineer").await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/chat/mentor", base_url))
        .bearer_auth(&token)
        .json(&json!({ "message": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn mentor_chat_requires_auth() {
    let base_url = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/chat/mentor", base_url))
        .json(&json!({ "message": "hello?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
