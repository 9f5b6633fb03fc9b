/// One row of `moderation_logs`.
#[derive(Clone, Debug)]
pub struct ModLogEntry {
    pub case_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub action: String,
    pub reason: String,
    pub created_at: u64,
}
