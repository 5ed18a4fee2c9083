/// Post handlers - creation, listing, fetch
use crate::db;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::services::{notifications, Mailer, NotificationService};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub message: String,
    pub post_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: Post,
}

/// Create a new post and notify its author
pub async fn create_post(
    pool: web::Data<PgPool>,
    mailer: web::Data<dyn Mailer>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = db::posts::create_post(&pool, &req.title, &req.description, req.user_id).await?;

    // The author lookup runs after the insert; an unknown author is not
    // an error and simply means no notification goes out.
    let author = db::users::find_by_id(&pool, req.user_id).await?;
    NotificationService::new(mailer.into_inner())
        .dispatch(notifications::post_created(author.as_ref()))
        .await;

    Ok(HttpResponse::Created().json(CreatePostResponse {
        message: "Post created successfully".to_string(),
        post_id: post.id,
    }))
}

/// List every post
pub async fn fetch_all_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let posts = db::posts::list_posts(&pool).await?;

    Ok(HttpResponse::Ok().json(PostsResponse { posts }))
}

/// Fetch a single post by id
pub async fn fetch_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    match db::posts::find_post_by_id(&pool, *post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(PostResponse { post })),
        None => Err(AppError::NotFound("Post not found".to_string())),
    }
}
