//! Users Module
//!
//! Profiles, search and account management under `/api/users`. The stored
//! user record and registration live in `backend::auth`.

pub mod db;
pub mod handlers;

pub use handlers::{
    delete_me, get_user_communities, get_user_posts, get_user_profile, list_users, update_me,
};
