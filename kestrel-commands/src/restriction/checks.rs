use kestrel_core::Data;
use kestrel_database::impls::staff;

/// Owner = env-seeded root owner or a `bot_owners` row.
pub async fn is_bot_owner(data: &Data, user_id: u64) -> anyhow::Result<bool> {
    if data.is_root_owner(user_id) {
        return Ok(true);
    }
    staff::is_owner(&data.db, user_id).await
}

/// Staff = owner or a `bot_admins` row. Staff bypass server-wide command
/// bans but not personal restrictions.
pub async fn is_bot_staff(data: &Data, user_id: u64) -> anyhow::Result<bool> {
    if is_bot_owner(data, user_id).await? {
        return Ok(true);
    }
    staff::is_admin(&data.db, user_id).await
}
