/// Comment database operations
use crate::error::Result;
use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment.
///
/// Neither `post_id` nor `parent_id` is validated against existing
/// rows; dangling references are accepted and only suppress the
/// notifications that would otherwise follow.
pub async fn create_comment(
    pool: &PgPool,
    text: &str,
    user_id: Uuid,
    post_id: Uuid,
    parent_id: Option<Uuid>,
) -> Result<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (text, user_id, post_id, parent_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, text, user_id, post_id, parent_id, created_at
        "#,
    )
    .bind(text)
    .bind(user_id)
    .bind(post_id)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment by ID
pub async fn find_comment_by_id(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>(
        "SELECT id, text, user_id, post_id, parent_id, created_at FROM comments WHERE id = $1",
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}
