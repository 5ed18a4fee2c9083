/// User database operations
use crate::error::{AppError, Result};
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new user carrying a freshly issued OTP.
///
/// The email column is UNIQUE; a concurrent insert for the same address
/// maps to the same `Conflict` as the pre-insert existence check.
pub async fn create_user(pool: &PgPool, name: &str, email: &str, otp: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, otp)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, otp, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(otp)
    .fetch_one(pool)
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("User already exists".to_string())
        }
        _ => AppError::from(err),
    })?;

    Ok(user)
}

/// Find a user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, otp, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user matching both email and OTP by exact string equality
pub async fn find_by_email_and_otp(pool: &PgPool, email: &str, otp: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, otp, created_at FROM users WHERE email = $1 AND otp = $2",
    )
    .bind(email)
    .bind(otp)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, otp, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Clear the stored OTP, making the issued code single-use
pub async fn clear_otp(pool: &PgPool, user_id: Uuid) -> Result<()> {
    sqlx::query("UPDATE users SET otp = NULL WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
