//! REST endpoints for learning-path generation and history.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::profile::CareerGoal;
use crate::auth::middleware::Claims;
use crate::db::models::LearningPathRow;
use crate::learning::templates;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePathRequest {
    /// Accepted as a free string: an unknown goal falls back to the
    /// AI Engineer template instead of failing.
    pub career_goal: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub modules: Vec<String>,
    pub progress: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathListResponse {
    pub learning_paths: Vec<LearningPathResponse>,
}

impl LearningPathResponse {
    pub fn from_row(row: &LearningPathRow) -> Self {
        Self {
            id: row.id.clone(),
            title: row.title.clone(),
            description: row.description.clone(),
            modules: serde_json::from_str(&row.modules).unwrap_or_default(),
            progress: row.progress,
            created_at: row.created_at.clone(),
        }
    }
}

/// POST /api/learning-path/generate — Resolve the template for the
/// requested career goal and persist a copy for the caller. JWT auth
/// required.
pub async fn generate_path(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<GeneratePathRequest>,
) -> Result<(StatusCode, Json<LearningPathResponse>), StatusCode> {
    let template = templates::template_for(CareerGoal::parse(body.career_goal.trim()));
    let modules: Vec<String> = template.modules.iter().map(|m| m.to_string()).collect();
    let modules_json = serde_json::to_string(&modules)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let row = LearningPathRow {
        id: Uuid::now_v7().to_string(),
        user_id: claims.sub.clone(),
        title: template.title.to_string(),
        description: template.description.to_string(),
        modules: modules_json,
        progress: 0,
        created_at: Utc::now().to_rfc3339(),
    };

    let db = state.db.clone();
    let row = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        // Reject tokens whose account no longer exists
        let user_exists: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE id = ?1",
                rusqlite::params![row.user_id],
                |r| r.get::<_, i64>(0).map(|c| c > 0),
            )
            .unwrap_or(false);
        if !user_exists {
            return Err(StatusCode::UNAUTHORIZED);
        }

        conn.execute(
            "INSERT INTO learning_paths (id, user_id, title, description, modules, progress, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.id,
                row.user_id,
                row.title,
                row.description,
                row.modules,
                row.progress,
                row.created_at,
            ],
        )
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(row)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    tracing::info!(path_id = %row.id, title = %row.title, "Learning path generated");

    Ok((
        StatusCode::CREATED,
        Json(LearningPathResponse::from_row(&row)),
    ))
}

/// GET /api/learning-path — List the caller's stored paths, newest first.
pub async fn list_paths(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<LearningPathListResponse>, StatusCode> {
    let db = state.db.clone();
    let user_id = claims.sub.clone();

    let learning_paths = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, title, description, modules, progress, created_at
                 FROM learning_paths WHERE user_id = ?1 ORDER BY created_at DESC",
            )
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let rows = stmt
            .query_map(rusqlite::params![user_id], |row| {
                Ok(LearningPathRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    modules: row.get(4)?,
                    progress: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let paths: Vec<LearningPathResponse> = rows
            .flatten()
            .map(|row| LearningPathResponse::from_row(&row))
            .collect();

        Ok::<_, StatusCode>(paths)
    })
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)??;

    Ok(Json(LearningPathListResponse { learning_paths }))
}
