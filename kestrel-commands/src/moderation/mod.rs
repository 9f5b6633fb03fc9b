pub mod appeallink;
pub mod ban;
pub mod kick;
pub mod logging;
pub mod modlogchannel;
pub mod modlogs;
pub mod purge;
pub mod timeout;
pub mod unban;
pub mod untimeout;
pub mod warn;
