//! Community membership and ally propagation
//!
//! Joining a community makes the newcomer an ally of every existing member.
//! Both steps run on the caller's connection so they commit together when
//! the caller holds a transaction.

use sqlx::SqliteConnection;
use uuid::Uuid;

use super::db;
use crate::backend::allies::db::insert_pair;
use crate::shared::social::fan_out_pairs;

/// Add `user_id` to the community and create ally edges with all current
/// members. Returns the number of new edges; pairs that were already allies
/// are left as they are.
///
/// The caller checks that the user is not yet a member.
pub async fn join(
    conn: &mut SqliteConnection,
    community_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let existing = db::list_member_ids(&mut *conn, community_id).await?;
    db::add_member(&mut *conn, community_id, user_id).await?;

    let mut created = 0;
    for pair in fan_out_pairs(user_id, &existing) {
        if insert_pair(&mut *conn, pair, Some(community_id)).await? {
            created += 1;
        }
    }

    tracing::info!(
        "User {} joined community {} ({} existing members, {} new allies)",
        user_id,
        community_id,
        existing.len(),
        created
    );
    Ok(created)
}
