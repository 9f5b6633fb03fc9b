/// One row of `bot_admins` or `bot_owners`.
#[derive(Clone, Debug)]
pub struct StaffEntry {
    pub user_id: u64,
    pub reason: String,
    pub granted_by: u64,
    pub created_at: u64,
}
