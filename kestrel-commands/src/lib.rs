pub mod afk;
pub mod ai;
pub mod embeds;
pub mod fun;
pub mod moderation;
pub mod restriction;
pub mod settings;
pub mod template;
pub mod utility;
pub mod verification;

use kestrel_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::botinfo::META,
    utility::serverinfo::META,
    utility::userinfo::META,
    utility::avatar::META,
    utility::poll::META,
    utility::remind::META,
    fun::eightball::META,
    fun::coinflip::META,
    fun::dice::META,
    fun::joke::META,
    fun::choose::META,
    fun::love::META,
    fun::rps::META,
    moderation::kick::META,
    moderation::ban::META,
    moderation::unban::META,
    moderation::timeout::META,
    moderation::untimeout::META,
    moderation::warn::META,
    moderation::purge::META,
    moderation::modlogs::META,
    moderation::modlogchannel::META,
    moderation::appeallink::META,
    restriction::commandban::BAN_META,
    restriction::commandban::UNBAN_META,
    restriction::commandmute::MUTE_META,
    restriction::commandmute::UNMUTE_META,
    restriction::commandbans::META,
    restriction::serverban::BAN_META,
    restriction::serverban::UNBAN_META,
    restriction::staff::ADDADMIN_META,
    restriction::staff::REMOVEADMIN_META,
    restriction::staff::ADMINS_META,
    restriction::staff::ADDOWNER_META,
    restriction::staff::REMOVEOWNER_META,
    restriction::staff::OWNERS_META,
    restriction::appeal::META,
    settings::prefix::META,
    settings::promotion::PROMOTE_META,
    settings::promotion::PROMOTION_META,
    verification::verify::META,
    verification::unverify::META,
    verification::verifysetup::META,
    template::template::META,
    template::temproles::META,
    template::wipe::WIPE_META,
    template::wipe::WIPETOGGLE_META,
    template::wipe::WIPESTATUS_META,
    template::wipe::WIPEGLOBAL_META,
    ai::ask::META,
    ai::imagine::META,
    ai::aimodel::META,
    ai::aitoggle::META,
    afk::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::botinfo::botinfo(),
        utility::serverinfo::serverinfo(),
        utility::userinfo::userinfo(),
        utility::avatar::avatar(),
        utility::poll::poll(),
        utility::remind::remind(),
        fun::eightball::eightball(),
        fun::coinflip::coinflip(),
        fun::dice::dice(),
        fun::joke::joke(),
        fun::choose::choose(),
        fun::love::love(),
        fun::rps::rps(),
        moderation::kick::kick(),
        moderation::ban::ban(),
        moderation::unban::unban(),
        moderation::timeout::timeout(),
        moderation::untimeout::untimeout(),
        moderation::warn::warn(),
        moderation::purge::purge(),
        moderation::modlogs::modlogs(),
        moderation::modlogchannel::modlogchannel(),
        moderation::appeallink::appeallink(),
        restriction::commandban::commandban(),
        restriction::commandban::commandunban(),
        restriction::commandmute::commandmute(),
        restriction::commandmute::commandunmute(),
        restriction::commandbans::commandbans(),
        restriction::serverban::serverban(),
        restriction::serverban::serverunban(),
        restriction::staff::addadmin(),
        restriction::staff::removeadmin(),
        restriction::staff::admins(),
        restriction::staff::addowner(),
        restriction::staff::removeowner(),
        restriction::staff::owners(),
        restriction::appeal::appeal(),
        settings::prefix::prefix(),
        settings::promotion::promote(),
        settings::promotion::promotion(),
        verification::verify::verify(),
        verification::unverify::unverify(),
        verification::verifysetup::verifysetup(),
        template::template::template(),
        template::temproles::temproles(),
        template::wipe::wipe(),
        template::wipe::wipetoggle(),
        template::wipe::wipestatus(),
        template::wipe::wipeglobal(),
        ai::ask::ask(),
        ai::imagine::imagine(),
        ai::aimodel::aimodel(),
        ai::aitoggle::aitoggle(),
        afk::afk(),
    ]
}
