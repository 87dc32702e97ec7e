//! Posts Module
//!
//! General and community posts, likes and the home feed under `/api/posts`.

pub mod db;
pub mod handlers;

pub use db::load_post_likes;
pub use handlers::{
    create_post, delete_post, get_feed, get_post, like_post, load_visible_post, unlike_post,
    update_post,
};
