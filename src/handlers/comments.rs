/// Comment handlers - creation with participant notifications
use crate::db;
use crate::error::Result;
use crate::services::notifications::{self, CommentKind};
use crate::services::{Mailer, NotificationService};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentResponse {
    pub message: String,
    pub comment_id: Uuid,
}

/// Create a comment and notify the thread participants
pub async fn create_comment(
    pool: web::Data<PgPool>,
    mailer: web::Data<dyn Mailer>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comment =
        db::comments::create_comment(&pool, &req.text, req.user_id, req.post_id, req.parent_id)
            .await?;

    // Notifications only make sense when the referenced post exists; a
    // dangling post_id suppresses them without failing the request.
    if let Some(post) = db::posts::find_post_by_id(&pool, req.post_id).await? {
        let post_author = db::users::find_by_id(&pool, post.user_id).await?;

        let parent_author = match req.parent_id {
            Some(parent_id) => match db::comments::find_comment_by_id(&pool, parent_id).await? {
                Some(parent) => db::users::find_by_id(&pool, parent.user_id).await?,
                None => None,
            },
            None => None,
        };

        let kind = if req.parent_id.is_some() {
            CommentKind::Reply {
                parent_author: parent_author.as_ref(),
            }
        } else {
            CommentKind::TopLevel
        };

        let planned = notifications::comment_notifications(&post, post_author.as_ref(), kind);
        NotificationService::new(mailer.into_inner())
            .dispatch(planned)
            .await;
    }

    Ok(HttpResponse::Created().json(CreateCommentResponse {
        message: "Comment created successfully".to_string(),
        comment_id: comment.id,
    }))
}
