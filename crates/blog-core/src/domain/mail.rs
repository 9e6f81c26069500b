use serde::{Deserialize, Serialize};

use super::post::Post;

/// Outgoing email handed to a [`Mailer`](crate::ports::Mailer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

impl MailMessage {
    /// Recommendation of `post` sent by `sender_name` to `recipient`.
    ///
    /// `post_url` must be the absolute URL of the post's detail page.
    pub fn recommend_post(
        post: &Post,
        post_url: &str,
        sender_name: &str,
        comments: &str,
        from: &str,
        recipient: &str,
    ) -> Self {
        Self {
            subject: format!("{sender_name} recommends you read {}", post.title),
            body: format!(
                "Read {} at {post_url}\n\n{sender_name}'s comments: {comments}",
                post.title
            ),
            from: from.to_string(),
            to: vec![recipient.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn recommendation_embeds_title_and_url() {
        let post = Post::new(Uuid::new_v4(), "Who was Django Reinhardt?", "django", "...").unwrap();
        let url = "http://example.com/2024/1/5/django/";
        let msg = MailMessage::recommend_post(
            &post,
            url,
            "Ann",
            "Worth a read",
            "noreply@blog.local",
            "bob@example.com",
        );

        assert_eq!(msg.subject, "Ann recommends you read Who was Django Reinhardt?");
        assert!(msg.body.starts_with("Read Who was Django Reinhardt? at http://example.com/2024/1/5/django/"));
        assert!(msg.body.ends_with("Ann's comments: Worth a read"));
        assert_eq!(msg.from, "noreply@blog.local");
        assert_eq!(msg.to, vec!["bob@example.com".to_string()]);
    }
}
