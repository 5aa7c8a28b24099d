use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub adopt: String,
    pub phone: String,
    pub price: i64,
    pub image_path: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct NewPost<'a> {
    pub name: &'a str,
    pub age: i32,
    pub gender: &'a str,
    pub adopt: &'a str,
    pub phone: &'a str,
    pub price: i64,
    pub image_path: Option<&'a str>,
}

impl Post {
    pub async fn create(db: &PgPool, new: &NewPost<'_>) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (name, age, gender, adopt, phone, price, image_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, age, gender, adopt, phone, price, image_path, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.age)
        .bind(new.gender)
        .bind(new.adopt)
        .bind(new.phone)
        .bind(new.price)
        .bind(new.image_path)
        .fetch_one(db)
        .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, name, age, gender, adopt, phone, price, image_path, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }
}
