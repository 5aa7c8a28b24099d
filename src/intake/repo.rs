use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PetOwner {
    pub id: i64,
    pub name: String,
    pub pet_name: String,
    pub age_group: String,
    pub gender: String,
    pub category: String,
    pub phone: String,
    pub email: String,
    pub pick_up_date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub struct NewPetOwner<'a> {
    pub name: &'a str,
    pub pet_name: &'a str,
    pub age_group: &'a str,
    pub gender: &'a str,
    pub category: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub pick_up_date: &'a str,
}

impl PetOwner {
    /// Insert a form submission; the UNIQUE constraint on email rejects a
    /// duplicate submission atomically.
    pub async fn create(db: &PgPool, new: &NewPetOwner<'_>) -> sqlx::Result<PetOwner> {
        sqlx::query_as::<_, PetOwner>(
            r#"
            INSERT INTO pet_owner (name, pet_name, age_group, gender, category,
                                   phone, email, pick_up_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, pet_name, age_group, gender, category,
                      phone, email, pick_up_date, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.pet_name)
        .bind(new.age_group)
        .bind(new.gender)
        .bind(new.category)
        .bind(new.phone)
        .bind(new.email)
        .bind(new.pick_up_date)
        .fetch_one(db)
        .await
    }

    /// List submissions, optionally restricted to one email.
    pub async fn list(db: &PgPool, email: Option<&str>) -> sqlx::Result<Vec<PetOwner>> {
        match email {
            Some(email) => {
                sqlx::query_as::<_, PetOwner>(
                    r#"
                    SELECT id, name, pet_name, age_group, gender, category,
                           phone, email, pick_up_date, created_at
                    FROM pet_owner
                    WHERE email = $1
                    "#,
                )
                .bind(email)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, PetOwner>(
                    r#"
                    SELECT id, name, pet_name, age_group, gender, category,
                           phone, email, pick_up_date, created_at
                    FROM pet_owner
                    "#,
                )
                .fetch_all(db)
                .await
            }
        }
    }
}
