pub mod avatar;
pub mod botinfo;
pub(crate) mod embeds;
pub mod help;
pub mod ping;
pub mod poll;
pub mod remind;
pub mod serverinfo;
pub mod userinfo;
