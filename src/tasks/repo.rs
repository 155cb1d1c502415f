use sqlx::PgPool;
use uuid::Uuid;

use crate::tasks::repo_types::Task;

impl Task {
    pub async fn create(
        db: &PgPool,
        owner_id: Uuid,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> anyhow::Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(completed)
        .fetch_one(db)
        .await?;
        Ok(task)
    }

    /// Owner-scoped listing, newest first. `q` matches the title
    /// case-insensitively; `completed` is an exact match.
    pub async fn list_by_owner(
        db: &PgPool,
        owner_id: Uuid,
        q: Option<&str>,
        completed: Option<bool>,
    ) -> anyhow::Result<Vec<Task>> {
        let pattern = q.map(|q| format!("%{}%", q));
        let rows = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
              AND ($2::text IS NULL OR title ILIKE $2)
              AND ($3::boolean IS NULL OR completed = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(pattern)
        .bind(completed)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Owner-scoped lookup; a task owned by someone else is absent.
    pub async fn find_by_id(db: &PgPool, owner_id: Uuid, id: Uuid) -> anyhow::Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $2 AND owner_id = $1
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(task)
    }

    /// Owner-scoped partial update. Absent fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        completed: Option<bool>,
    ) -> anyhow::Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                completed = COALESCE($5, completed),
                updated_at = now()
            WHERE id = $2 AND owner_id = $1
            RETURNING id, owner_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(completed)
        .fetch_optional(db)
        .await?;
        Ok(task)
    }

    /// Owner-scoped delete; false when nothing matched.
    pub async fn delete(db: &PgPool, owner_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM tasks WHERE id = $2 AND owner_id = $1"#)
            .bind(owner_id)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
