//! Comments Module
//!
//! Threaded comments on posts and their likes under `/api/comments`.

pub mod db;
pub mod handlers;

pub use handlers::{
    create_comment, delete_comment, get_post_comments, like_comment, unlike_comment,
    update_comment,
};
