use poise::serenity_prelude as serenity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Voice,
}

#[derive(Clone, Copy, Debug)]
pub struct ChannelSpec {
    pub emoji: &'static str,
    pub name: &'static str,
    pub kind: ChannelKind,
}

#[derive(Clone, Copy, Debug)]
pub struct CategorySpec {
    pub name: &'static str,
    /// Hidden from @everyone; visible to the staff role ladder.
    pub staff_only: bool,
    pub channels: &'static [ChannelSpec],
}

#[derive(Clone, Copy, Debug)]
pub struct RoleSpec {
    pub name: &'static str,
    pub color: u32,
    pub permissions: serenity::Permissions,
}

const fn text(emoji: &'static str, name: &'static str) -> ChannelSpec {
    ChannelSpec {
        emoji,
        name,
        kind: ChannelKind::Text,
    }
}

const fn voice(emoji: &'static str, name: &'static str) -> ChannelSpec {
    ChannelSpec {
        emoji,
        name,
        kind: ChannelKind::Voice,
    }
}

const MOD_PERMISSIONS: serenity::Permissions = serenity::Permissions::from_bits_truncate(
    serenity::Permissions::KICK_MEMBERS.bits()
        | serenity::Permissions::BAN_MEMBERS.bits()
        | serenity::Permissions::MANAGE_MESSAGES.bits()
        | serenity::Permissions::MANAGE_NICKNAMES.bits()
        | serenity::Permissions::MODERATE_MEMBERS.bits()
        | serenity::Permissions::VIEW_AUDIT_LOG.bits(),
);

const ADMIN_PERMISSIONS: serenity::Permissions = serenity::Permissions::from_bits_truncate(
    MOD_PERMISSIONS.bits()
        | serenity::Permissions::MANAGE_CHANNELS.bits()
        | serenity::Permissions::MANAGE_GUILD.bits()
        | serenity::Permissions::MANAGE_ROLES.bits()
        | serenity::Permissions::MANAGE_WEBHOOKS.bits()
        | serenity::Permissions::MANAGE_GUILD_EXPRESSIONS.bits(),
);

/// Staff ladder created for the appeal layout and by `temproles`, highest
/// first so creation order mirrors the hierarchy.
pub const STAFF_ROLES: &[RoleSpec] = &[
    RoleSpec {
        name: "Owner",
        color: 0xFF_00_00,
        permissions: serenity::Permissions::all(),
    },
    RoleSpec {
        name: "Co-Owner",
        color: 0xFF_80_00,
        permissions: serenity::Permissions::all(),
    },
    RoleSpec {
        name: "Manager",
        color: 0xFF_FF_00,
        permissions: serenity::Permissions::all(),
    },
    RoleSpec {
        name: "Administrator",
        color: 0xFF_00_FF,
        permissions: ADMIN_PERMISSIONS,
    },
    RoleSpec {
        name: "Moderator",
        color: 0x00_FF_00,
        permissions: MOD_PERMISSIONS,
    },
];

const INFORMATION_BLOCK: CategorySpec = CategorySpec {
    name: "Information",
    staff_only: false,
    channels: &[
        text("\u{1F4DC}", "rules"),
        text("\u{1F4E2}", "announcements"),
        text("\u{1F4DD}", "server-notes"),
        text("\u{1F4B1}", "change-logs"),
        text("\u{1F5A5}", "staff-applications"),
    ],
};

const GENERAL_BLOCK: CategorySpec = CategorySpec {
    name: "General",
    staff_only: false,
    channels: &[
        text("\u{1F5E8}", "general"),
        text("\u{1F602}", "memes"),
        text("\u{1F44B}", "introductions"),
        text("\u{1F38A}", "birthdays"),
        text("\u{1F4BB}", "self-promotion"),
    ],
};

const EXTRAS_BLOCK: CategorySpec = CategorySpec {
    name: "Extras",
    staff_only: false,
    channels: &[
        text("\u{1F522}", "counting"),
        text("\u{1F608}", "spam"),
        text("\u{1F39F}", "tickets"),
    ],
};

const VOICE_BLOCK: CategorySpec = CategorySpec {
    name: "Voice Chat",
    staff_only: false,
    channels: &[
        voice("\u{1F50A}", "voice-chat-1"),
        voice("\u{1F50A}", "voice-chat-2"),
        voice("\u{1F3AE}", "gaming"),
        voice("\u{1F3AD}", "theatre"),
    ],
};

const STAFF_BLOCK: CategorySpec = CategorySpec {
    name: "Staff Only",
    staff_only: true,
    channels: &[
        text("\u{1F4E2}", "staff-announcements"),
        text("\u{1F4BC}", "all-staff-chat"),
        text("\u{1F4BC}", "moderator-chat"),
        text("\u{1F4BC}", "administrator-chat"),
        text("\u{1F440}", "staff-logs"),
        voice("\u{1F50A}", "staff-voice-chat"),
    ],
};

const GAMING_BLOCK: CategorySpec = CategorySpec {
    name: "Gaming",
    staff_only: false,
    channels: &[
        text("\u{1F3AE}", "game-chat"),
        text("\u{1F3C6}", "tournaments"),
        text("\u{1F4F8}", "clips"),
        voice("\u{1F3AE}", "game-lobby-1"),
        voice("\u{1F3AE}", "game-lobby-2"),
    ],
};

const COMMUNITY_BLOCK: CategorySpec = CategorySpec {
    name: "Community",
    staff_only: false,
    channels: &[
        text("\u{1F4AC}", "discussions"),
        text("\u{1F3A8}", "art-showcase"),
        text("\u{1F436}", "pet-reveals"),
        text("\u{1F3B5}", "music"),
    ],
};

const APPEAL_STRUCTURE: &[CategorySpec] = &[
    CategorySpec {
        name: "Appeals",
        staff_only: false,
        channels: &[
            text("\u{1F4DC}", "appeal-rules"),
            text("\u{1F4E8}", "submit-appeal"),
            text("\u{2753}", "appeal-faq"),
        ],
    },
    CategorySpec {
        name: "Staff",
        staff_only: true,
        channels: &[
            text("\u{1F4AC}", "general-staff-chat"),
            text("\u{1F6E1}", "moderator-chat"),
            text("\u{26A1}", "administrator-chat"),
            text("\u{1F451}", "manager-chat"),
            text("\u{1F4CA}", "system-logs"),
        ],
    },
];

const DEFAULT_STRUCTURE: &[CategorySpec] = &[
    INFORMATION_BLOCK,
    GENERAL_BLOCK,
    EXTRAS_BLOCK,
    VOICE_BLOCK,
    STAFF_BLOCK,
];

/// What the generator should build for one invocation.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    pub categories: Vec<CategorySpec>,
    /// The appeal layout also creates the staff role ladder.
    pub create_staff_roles: bool,
}

/// Keyword tags recognized inside a free-text template description.
pub fn parse_description_tags(description: &str) -> Vec<&'static str> {
    let lowered = description.to_lowercase();
    let mut tags = Vec::new();

    for tag in ["info", "community", "gaming", "voice", "staff"] {
        if lowered.contains(tag) {
            tags.push(tag);
        }
    }

    tags
}

fn block_for_tag(tag: &str) -> Option<CategorySpec> {
    match tag {
        "info" => Some(INFORMATION_BLOCK),
        "community" => Some(COMMUNITY_BLOCK),
        "gaming" => Some(GAMING_BLOCK),
        "voice" => Some(VOICE_BLOCK),
        "staff" => Some(STAFF_BLOCK),
        _ => None,
    }
}

/// Pick a layout from a free-text description. `appeal` wins outright, known
/// tags assemble a custom layout, anything else falls back to the default.
pub fn plan_for_description(description: Option<&str>) -> TemplatePlan {
    let Some(description) = description.map(str::trim).filter(|text| !text.is_empty()) else {
        return TemplatePlan {
            categories: DEFAULT_STRUCTURE.to_vec(),
            create_staff_roles: false,
        };
    };

    let lowered = description.to_lowercase();
    if lowered.contains("appeal") {
        return TemplatePlan {
            categories: APPEAL_STRUCTURE.to_vec(),
            create_staff_roles: true,
        };
    }

    let blocks: Vec<CategorySpec> = parse_description_tags(description)
        .into_iter()
        .filter_map(block_for_tag)
        .collect();

    if blocks.is_empty() {
        TemplatePlan {
            categories: DEFAULT_STRUCTURE.to_vec(),
            create_staff_roles: false,
        }
    } else {
        TemplatePlan {
            categories: blocks,
            create_staff_roles: false,
        }
    }
}

/// Full channel name as it appears in Discord.
pub fn full_channel_name(channel: &ChannelSpec) -> String {
    format!("{}{}", channel.emoji, channel.name)
}

#[cfg(test)]
mod tests {
    use super::{parse_description_tags, plan_for_description};

    #[test]
    fn empty_descriptions_get_the_default_layout() {
        let plan = plan_for_description(None);
        assert_eq!(plan.categories.len(), 5);
        assert!(!plan.create_staff_roles);

        let plan = plan_for_description(Some("   "));
        assert_eq!(plan.categories.len(), 5);
    }

    #[test]
    fn appeal_descriptions_win_and_create_roles() {
        let plan = plan_for_description(Some("an appealing appeal server"));
        assert!(plan.create_staff_roles);
        assert_eq!(plan.categories.len(), 2);
        assert_eq!(plan.categories[1].name, "Staff");
    }

    #[test]
    fn tags_assemble_custom_layouts() {
        let plan = plan_for_description(Some("gaming with voice channels"));
        assert!(!plan.create_staff_roles);
        let names: Vec<&str> = plan
            .categories
            .iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["Gaming", "Voice Chat"]);
    }

    #[test]
    fn unknown_descriptions_fall_back_to_default() {
        let plan = plan_for_description(Some("something unrelated"));
        assert_eq!(plan.categories.len(), 5);
    }

    #[test]
    fn tag_parsing_is_case_insensitive_and_ordered() {
        assert_eq!(
            parse_description_tags("STAFF and Gaming"),
            vec!["gaming", "staff"]
        );
        assert!(parse_description_tags("nothing here").is_empty());
    }
}
