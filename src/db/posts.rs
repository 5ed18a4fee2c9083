/// Post database operations
use crate::error::Result;
use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post.
///
/// The author reference is not validated; a post may carry a `user_id`
/// with no matching user row.
pub async fn create_post(
    pool: &PgPool,
    title: &str,
    description: &str,
    user_id: Uuid,
) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, description, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, description, user_id, created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, title, description, user_id, created_at FROM posts WHERE id = $1",
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Fetch every post, unfiltered and unpaginated, in store order
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, title, description, user_id, created_at FROM posts",
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
