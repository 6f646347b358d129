use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Credentials plus the demographic profile consumed by the survey
/// prompt builder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<Date>,
    pub occupation: Option<String>,
    pub work_style: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, gender, dob, occupation, work_style, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, gender, dob, occupation, work_style, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        profile: &NewProfile<'_>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, gender, dob, occupation, work_style)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, password_hash, name, gender, dob, occupation, work_style, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(profile.name)
        .bind(profile.gender)
        .bind(profile.dob)
        .bind(profile.occupation)
        .bind(profile.work_style)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}

/// Profile columns supplied at registration.
#[derive(Debug, Default)]
pub struct NewProfile<'a> {
    pub name: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub dob: Option<Date>,
    pub occupation: Option<&'a str>,
    pub work_style: Option<&'a str>,
}
