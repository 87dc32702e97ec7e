//! Allies Module
//!
//! The undirected ally graph under `/api/allies`.

pub mod db;
pub mod handlers;

pub use handlers::{check_ally, create_ally, list_my_allies, list_user_allies, remove_ally};
