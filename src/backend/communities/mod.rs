//! Communities Module
//!
//! Communities, membership and the ally fan-out that happens on join.
//!
//! ```text
//! communities/
//! ├── db.rs          - Community and member queries
//! ├── membership.rs  - Join with ally propagation
//! └── handlers.rs    - HTTP handlers under /api/communities
//! ```

pub mod db;
pub mod handlers;
pub mod membership;

pub use handlers::{
    create_community, delete_community, get_community, get_community_posts, join_community,
    leave_community, list_communities, list_members, update_community,
};
