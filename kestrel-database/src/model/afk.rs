/// One row of `afk_status`.
#[derive(Clone, Debug)]
pub struct AfkEntry {
    pub message: String,
    pub since: u64,
}
