/// Activity notification planning and dispatch
///
/// Planning is pure: given the looked-up post/author context it returns
/// the emails to send. Dispatch sends them through the mailer and
/// isolates delivery failures from the triggering write, which is
/// already durable by the time dispatch runs.
use crate::models::{Post, User};
use crate::services::email::Mailer;
use std::sync::Arc;
use tracing::warn;

/// One planned outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Where a new comment sits in the thread
#[derive(Debug, Clone, Copy)]
pub enum CommentKind<'a> {
    /// Attached directly to the post
    TopLevel,
    /// Reply to another comment, whose author may be unresolvable
    Reply { parent_author: Option<&'a User> },
}

/// Notification for a freshly created post, when its author is known.
pub fn post_created(author: Option<&User>) -> Vec<EmailMessage> {
    match author {
        Some(author) => vec![EmailMessage {
            to: author.email.clone(),
            subject: "Post Created".to_string(),
            body: "Congrats! Your post is live now.".to_string(),
        }],
        None => Vec::new(),
    }
}

/// Notifications for a freshly created comment.
///
/// A reply notifies the parent comment's author, and the post's author
/// unless that would duplicate the first email. The post author is
/// notified even when the parent comment's author cannot be resolved.
pub fn comment_notifications(
    post: &Post,
    post_author: Option<&User>,
    kind: CommentKind<'_>,
) -> Vec<EmailMessage> {
    let mut planned = Vec::new();

    match kind {
        CommentKind::Reply { parent_author } => {
            if let Some(parent) = parent_author {
                planned.push(EmailMessage {
                    to: parent.email.clone(),
                    subject: "Reply Notification".to_string(),
                    body: format!("User replied to your comment on {}.", post.title),
                });
            }

            if let Some(author) = post_author {
                let already_notified = parent_author
                    .map(|parent| parent.email == author.email)
                    .unwrap_or(false);

                if !already_notified {
                    planned.push(EmailMessage {
                        to: author.email.clone(),
                        subject: "Reply Notification".to_string(),
                        body: format!("Users are replying on post for {}.", post.title),
                    });
                }
            }
        }
        CommentKind::TopLevel => {
            if let Some(author) = post_author {
                planned.push(EmailMessage {
                    to: author.email.clone(),
                    subject: "Comment Notification".to_string(),
                    body: format!("A user commented on your post {}.", post.title),
                });
            }
        }
    }

    planned
}

/// Sends planned notifications, isolating delivery failures.
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Dispatch each message in order. A failed send is logged and does
    /// not abort the remaining messages or the caller's request.
    pub async fn dispatch(&self, messages: Vec<EmailMessage>) {
        for message in messages {
            if let Err(err) = self
                .mailer
                .send(&message.to, &message.subject, &message.body)
                .await
            {
                warn!(
                    recipient = %message.to,
                    subject = %message.subject,
                    error = %err,
                    "notification email failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "someone".to_string(),
            email: email.to_string(),
            otp: None,
            created_at: Utc::now(),
        }
    }

    fn post(title: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "d".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn post_created_notifies_known_author() {
        let author = user("author@example.com");
        let planned = post_created(Some(&author));

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].to, "author@example.com");
        assert_eq!(planned[0].subject, "Post Created");
        assert_eq!(planned[0].body, "Congrats! Your post is live now.");
    }

    #[test]
    fn post_created_without_author_plans_nothing() {
        assert!(post_created(None).is_empty());
    }

    #[test]
    fn top_level_comment_notifies_post_author() {
        let author = user("a@example.com");
        let planned =
            comment_notifications(&post("My Post"), Some(&author), CommentKind::TopLevel);

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].to, "a@example.com");
        assert_eq!(planned[0].subject, "Comment Notification");
        assert_eq!(planned[0].body, "A user commented on your post My Post.");
    }

    #[test]
    fn top_level_comment_without_author_plans_nothing() {
        let planned = comment_notifications(&post("My Post"), None, CommentKind::TopLevel);
        assert!(planned.is_empty());
    }

    #[test]
    fn reply_notifies_parent_author_and_post_author() {
        let post_author = user("a@example.com");
        let parent_author = user("b@example.com");
        let planned = comment_notifications(
            &post("My Post"),
            Some(&post_author),
            CommentKind::Reply {
                parent_author: Some(&parent_author),
            },
        );

        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].to, "b@example.com");
        assert_eq!(planned[0].subject, "Reply Notification");
        assert_eq!(planned[0].body, "User replied to your comment on My Post.");
        assert_eq!(planned[1].to, "a@example.com");
        assert_eq!(planned[1].subject, "Reply Notification");
        assert_eq!(planned[1].body, "Users are replying on post for My Post.");
    }

    #[test]
    fn reply_on_own_post_sends_single_email() {
        let author = user("same@example.com");
        let planned = comment_notifications(
            &post("My Post"),
            Some(&author),
            CommentKind::Reply {
                parent_author: Some(&author),
            },
        );

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].to, "same@example.com");
        assert_eq!(planned[0].body, "User replied to your comment on My Post.");
    }

    #[test]
    fn reply_with_missing_parent_author_still_notifies_post_author() {
        let post_author = user("a@example.com");
        let planned = comment_notifications(
            &post("My Post"),
            Some(&post_author),
            CommentKind::Reply {
                parent_author: None,
            },
        );

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].to, "a@example.com");
        assert_eq!(planned[0].body, "Users are replying on post for My Post.");
    }

    #[test]
    fn reply_with_missing_post_author_notifies_only_parent_author() {
        let parent_author = user("b@example.com");
        let planned = comment_notifications(
            &post("My Post"),
            None,
            CommentKind::Reply {
                parent_author: Some(&parent_author),
            },
        );

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].to, "b@example.com");
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<EmailMessage>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
            self.sent.lock().unwrap().push(EmailMessage {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
            Err(AppError::Email("relay unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn dispatch_sends_every_planned_message() {
        let mailer = Arc::new(RecordingMailer::default());
        let author = user("a@example.com");
        let parent_author = user("b@example.com");
        let planned = comment_notifications(
            &post("My Post"),
            Some(&author),
            CommentKind::Reply {
                parent_author: Some(&parent_author),
            },
        );

        NotificationService::new(mailer.clone()).dispatch(planned).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
    }

    #[tokio::test]
    async fn dispatch_swallows_delivery_failures() {
        let author = user("a@example.com");
        let planned = post_created(Some(&author));

        // Must not panic or propagate the error.
        NotificationService::new(Arc::new(FailingMailer)).dispatch(planned).await;
    }
}
