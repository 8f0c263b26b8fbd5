//! Data models for the application.

mod post;
mod user;

pub use post::{parse_author_id, parse_post_id, Post, PostWithAuthor, POST_NOT_FOUND};
pub use user::{
    client_username, find_profile, ClientUser, User, DEFAULT_PROFILE_PICTURE, USER_NOT_FOUND,
};
