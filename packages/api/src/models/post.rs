//! # Posts and their authors
//!
//! [`Post`] is a row of the `posts` table. Posts are created once through
//! `create_post` and never edited afterwards.
//!
//! Every listing returned to the client is a [`PostWithAuthor`]: the post plus the
//! [`ClientUser`] projection of whoever wrote it. [`PostWithAuthor::pair_all`] builds
//! these from a batch of posts and the users loaded for them, and refuses to return a
//! post whose author cannot be resolved.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{ClientUser, User};
use crate::error::ApiError;

pub const POST_NOT_FOUND: &str = "Post not found";

/// Id from a `/post/:id` route. Anything that is not a UUID names no post.
pub fn parse_post_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(POST_NOT_FOUND.to_string()))
}

/// Author id for a per-user listing. A malformed id has no posts.
pub fn parse_author_id(user_id: &str) -> Option<Uuid> {
    Uuid::parse_str(user_id).ok()
}

/// A single post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A post together with its author, as rendered by `PostView`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: ClientUser,
}

impl PostWithAuthor {
    /// Attach an author projection to each post, keeping the order of `posts`.
    pub fn pair_all(posts: Vec<Post>, authors: &[User]) -> Result<Vec<Self>, ApiError> {
        let by_id: HashMap<Uuid, ClientUser> = authors
            .iter()
            .map(|user| (user.id, user.to_client()))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let author = by_id.get(&post.author_id).cloned().ok_or_else(|| {
                    ApiError::Internal(format!("Author for post {} not found", post.id))
                })?;
                Ok(PostWithAuthor { post, author })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u128, username: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::from_u128(id),
            email: format!("{username}@example.com"),
            username: Some(username.to_string()),
            name: None,
            avatar_url: None,
            provider: "github".to_string(),
            provider_id: id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn post(id: u128, author: u128, content: &str) -> Post {
        Post {
            id: Uuid::from_u128(id),
            content: content.to_string(),
            author_id: Uuid::from_u128(author),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pair_all_keeps_post_order() {
        let authors = vec![user(1, "alice"), user(2, "bob")];
        let posts = vec![post(10, 2, "🦀"), post(11, 1, "🎉"), post(12, 2, "🔥")];

        let paired = PostWithAuthor::pair_all(posts, &authors).unwrap();
        let names: Vec<_> = paired.iter().map(|p| p.author.username.as_str()).collect();
        assert_eq!(names, ["bob", "alice", "bob"]);
        assert_eq!(paired[1].post.content, "🎉");
        assert_eq!(paired[0].author.id, Uuid::from_u128(2).to_string());
    }

    #[test]
    fn test_pair_all_fails_on_missing_author() {
        let authors = vec![user(1, "alice")];
        let posts = vec![post(10, 1, "🦀"), post(11, 3, "🎉")];

        let err = PostWithAuthor::pair_all(posts, &authors).unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_pair_all_empty() {
        assert!(PostWithAuthor::pair_all(Vec::new(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_post_id_is_not_found() {
        let err = parse_post_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), POST_NOT_FOUND);
        assert!(parse_post_id("").is_err());

        let id = Uuid::from_u128(9);
        assert_eq!(parse_post_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_malformed_author_id_has_no_posts() {
        assert_eq!(parse_author_id("12345"), None);
        assert_eq!(parse_author_id(&Uuid::nil().to_string()), Some(Uuid::nil()));
    }
}
