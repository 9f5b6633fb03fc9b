/// One row of `server_command_bans`.
#[derive(Clone, Debug)]
pub struct ServerBan {
    pub guild_id: u64,
    pub reason: String,
    pub banned_by: u64,
    pub created_at: u64,
}
