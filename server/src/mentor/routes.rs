//! REST endpoint for the mentor chat.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::profile::CareerGoal;
use crate::auth::middleware::Claims;
use crate::mentor::responder;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MentorChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MentorChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/chat/mentor — Canned mentor reply keyed by the caller's career
/// goal. JWT auth required. Stateless per call: one request, one reply.
pub async fn mentor_chat(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<MentorChatRequest>,
) -> Result<Json<MentorChatResponse>, StatusCode> {
    if body.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let db = state.db.clone();
    let user_id = claims.sub.clone();

    let career_goal: String = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        conn.query_row(
            "SELECT career_goal FROM users WHERE id = ?1",
            rusqlite::params![user_id],
            |row| row.get(0),
        )
        .map_err(|_| StatusCode::UNAUTHORIZED)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    // A stored goal the selector no longer recognizes falls back to the
    // AI Engineer list rather than failing.
    let reply = responder::select_for_goal(&mut rand::rng(), CareerGoal::parse(&career_goal));

    Ok(Json(MentorChatResponse {
        response: reply.to_string(),
        timestamp: Utc::now(),
    }))
}
