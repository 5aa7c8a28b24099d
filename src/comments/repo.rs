use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Comment {
    pub async fn create(db: &PgPool, name: &str, message: &str) -> sqlx::Result<Comment> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (name, message)
            VALUES ($1, $2)
            RETURNING id, name, message, created_at
            "#,
        )
        .bind(name)
        .bind(message)
        .fetch_one(db)
        .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, name, message, created_at
            FROM comments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }
}
