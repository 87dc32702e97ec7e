//! Social Module
//!
//! Data structures for the social graph and its content:
//!
//! - `UserSummary` / `UserProfile` - Account views without credentials
//! - `Community` - A named group with members
//! - `Post` - General or community post, with likes
//! - `Comment` - Threaded comment on a post
//! - `Subscription` - A user's subscription to a community
//! - `AllyPair` - Undirected edge between two users
//!
//! # Usage
//!
//! ```rust
//! use allynet::shared::social::{fan_out_pairs, AllyPair};
//! use uuid::Uuid;
//!
//! let newcomer = Uuid::new_v4();
//! let members = vec![Uuid::new_v4(), Uuid::new_v4()];
//! assert_eq!(fan_out_pairs(newcomer, &members).len(), 2);
//! ```

pub mod ally;
pub mod comment;
pub mod community;
pub mod post;
pub mod subscription;
pub mod user;

pub use ally::{fan_out_pairs, AllyCheckResponse, AllyPair, AllyResponse, CreateAllyRequest};
pub use comment::{
    build_thread, Comment, CommentNode, CreateCommentRequest, UpdateCommentRequest,
};
pub use community::{
    Community, CommunityDetail, CommunitySearchQuery, CreateCommunityRequest,
    JoinCommunityResponse, UpdateCommunityRequest,
};
pub use post::{assemble_feed, CreatePostRequest, LikesResponse, Post, PostType, UpdatePostRequest};
pub use subscription::{
    CreateSubscriptionRequest, Subscription, SubscriptionStatus, FREE_PLAN,
};
pub use user::{UpdateProfileRequest, UserProfile, UserResponse, UserSearchQuery, UserSummary};
