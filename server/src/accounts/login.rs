use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::accounts::registration::{AuthApiResponse, UserResponse};
use crate::auth::middleware::Claims;
use crate::auth::{jwt, password};
use crate::db::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginApiRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
/// Verify credentials and issue an access token. Unknown email and wrong
/// password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<AuthApiResponse>, StatusCode> {
    let db = state.db.clone();
    let jwt_secret = state.jwt_secret.clone();
    let email = req.email.trim().to_lowercase();
    let provided = req.password.clone();

    let (token, user) = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let user = fetch_user(&conn, "email", &email).ok_or(StatusCode::UNAUTHORIZED)?;

        // Argon2 verification is deliberately slow; we are already on the
        // blocking pool here.
        if !password::verify_password(&provided, &user.password_hash) {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let token = jwt::issue_access_token(&jwt_secret, &user.id)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok((token, user))
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthApiResponse {
        token,
        user: UserResponse::from_row(&user),
    }))
}

/// GET /api/auth/profile — Return the authenticated user's record.
pub async fn profile(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<UserResponse>, StatusCode> {
    let db = state.db.clone();
    let user_id = claims.sub.clone();

    let user = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        fetch_user(&conn, "id", &user_id).ok_or(StatusCode::NOT_FOUND)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok(Json(UserResponse::from_row(&user)))
}

fn fetch_user(conn: &rusqlite::Connection, column: &str, value: &str) -> Option<User> {
    // `column` is a compile-time constant at both call sites, never user input
    let sql = format!(
        "SELECT id, name, email, password_hash, career_goal, education_level, learning_style, created_at, updated_at
         FROM users WHERE {} = ?1",
        column
    );
    conn.query_row(&sql, [value], |row| {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            career_goal: row.get(4)?,
            education_level: row.get(5)?,
            learning_style: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    })
    .ok()
}
