/// Anchor Service Library
///
/// Backend for the anchor social-posting application: OTP email
/// authentication, posts, threaded comments, and email notifications to
/// thread participants.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for users, posts, comments
/// - `services`: Business logic layer (OTP flow, email, notifications)
/// - `db`: Database access layer
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
