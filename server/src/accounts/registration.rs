use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::profile::{CareerGoal, EducationLevel, LearningStyle};
use crate::auth::{jwt, password};
use crate::db::models::User;
use crate::state::AppState;

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterApiRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Profile fields arrive as free strings and are checked against the
    /// fixed sets in the handler, so a bad value gets a 400 like every
    /// other validation failure.
    pub career_goal: String,
    pub education_level: String,
    pub learning_style: String,
}

#[derive(Debug, Serialize)]
pub struct AuthApiResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile: ProfileResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub career_goal: String,
    pub education_level: String,
    pub learning_style: String,
}

impl UserResponse {
    pub fn from_row(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            profile: ProfileResponse {
                career_goal: user.career_goal.clone(),
                education_level: user.education_level.clone(),
                learning_style: user.learning_style.clone(),
            },
        }
    }
}

/// POST /api/auth/register
/// Create a new account and issue an access token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterApiRequest>,
) -> Result<(StatusCode, Json<AuthApiResponse>), (StatusCode, String)> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".to_string()));
    }

    let email = req.email.trim().to_lowercase();
    if !email.contains('@') || email.len() < 3 {
        return Err((StatusCode::BAD_REQUEST, "Valid email required".to_string()));
    }

    if req.password.len() < MIN_PASSWORD_LENGTH {
        return Err((
            StatusCode::BAD_REQUEST,
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let career_goal = CareerGoal::parse(&req.career_goal)
        .ok_or((StatusCode::BAD_REQUEST, "Invalid career goal".to_string()))?;
    let education_level = EducationLevel::parse(&req.education_level)
        .ok_or((StatusCode::BAD_REQUEST, "Invalid education level".to_string()))?;
    let learning_style = LearningStyle::parse(&req.learning_style)
        .ok_or((StatusCode::BAD_REQUEST, "Invalid learning style".to_string()))?;

    let db = state.db.clone();
    let jwt_secret = state.jwt_secret.clone();
    let password = req.password.clone();

    // Hashing is CPU-bound, so it runs on the blocking pool alongside the insert.
    let (token, user) = tokio::task::spawn_blocking(move || {
        let password_hash = password::hash_password(&password)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password".to_string()))?;

        let conn = db
            .lock()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("DB lock: {}", e)))?;

        // Check email uniqueness
        let existing: Option<String> = conn
            .query_row("SELECT id FROM users WHERE email = ?1", [&email], |row| {
                row.get(0)
            })
            .ok();
        if existing.is_some() {
            return Err((StatusCode::CONFLICT, "Email already registered".to_string()));
        }

        let user_id = Uuid::now_v7().to_string();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, career_goal, education_level, learning_style, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            rusqlite::params![
                user_id,
                name,
                email,
                password_hash,
                career_goal.as_str(),
                education_level.as_str(),
                learning_style.as_str(),
                now,
            ],
        )
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Insert failed: {}", e)))?;

        let token = jwt::issue_access_token(&jwt_secret, &user_id)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Token issue failed".to_string()))?;

        let user = User {
            id: user_id,
            name,
            email,
            password_hash,
            career_goal: career_goal.as_str().to_string(),
            education_level: education_level.as_str().to_string(),
            learning_style: learning_style.as_str().to_string(),
            created_at: now.clone(),
            updated_at: now,
        };

        Ok((token, user))
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Task join: {}", e)))??;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthApiResponse {
            token,
            user: UserResponse::from_row(&user),
        }),
    ))
}
