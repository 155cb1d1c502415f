use serde::{Deserialize, Serialize};

/// Request body for task creation.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Partial task update; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Query string for task listing.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub q: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}
