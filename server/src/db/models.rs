/// Database row types for all tables.
/// These correspond 1:1 to the SQLite schema defined in migrations.rs.

/// User record in the users table
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub career_goal: String,
    pub education_level: String,
    pub learning_style: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Stored learning path. `modules` holds a JSON array of module titles.
#[derive(Debug, Clone)]
pub struct LearningPathRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub modules: String,
    pub progress: i64,
    pub created_at: String,
}
