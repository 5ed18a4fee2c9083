/// Data models for anchor-service
///
/// Wire representation uses camelCase field names. The stored OTP is
/// never serialized.
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A user account, created on OTP issuance.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Current one-time passcode; cleared after successful verification.
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A post; immutable after creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post; `parent_id` is set for replies and forms a
/// parent-pointer tree.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_keys() {
        let post = Post {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            description: "D".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn user_never_exposes_otp() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            otp: Some("042913".to_string()),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("otp").is_none());
        assert_eq!(value["email"], "ada@example.com");
    }
}
