/// HTTP request handlers
pub mod auth;
pub mod comments;
pub mod posts;

use actix_web::web;

/// Register every route this service serves.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-otp", web::post().to(auth::send_otp))
        .route("/verify-otp", web::post().to(auth::verify_otp))
        .route("/fetch-all-posts", web::get().to(posts::fetch_all_posts))
        .route("/fetch-post/{post_id}", web::get().to(posts::fetch_post))
        .route("/create-post", web::post().to(posts::create_post))
        .route("/create-comment", web::post().to(comments::create_comment));
}
