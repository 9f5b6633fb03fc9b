use std::collections::HashSet;

use kestrel_database::Database;
use kestrel_llm::OpenRouterService;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub llm: Option<OpenRouterService>,
    /// User ids granted root owner status via `KESTREL_OWNER_IDS`.
    pub owner_ids: HashSet<u64>,
}

impl Data {
    /// Env-seeded owners; the database can grant more via `bot_owners`.
    pub fn is_root_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
