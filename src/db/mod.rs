/// Database operations for anchor-service
pub mod comments;
pub mod posts;
pub mod users;
