use crate::CommandMeta;

/// Render one help page, grouping commands under category headers.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut description = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                description.push('\n');
            }
            description.push_str(&format!("**{}**\n", capitalize(command.category)));
            current_category = Some(command.category);
        }

        description.push_str(&format!("`{}` — {}\n", command.usage, command.desc));
    }

    description
}

pub fn unknown_category_message(wanted: &str, categories: &[&str]) -> String {
    format!(
        "Unknown category `{}`. Available categories: {}",
        wanted,
        categories.join(", ")
    )
}

pub fn no_commands_message(category: Option<&str>) -> String {
    match category {
        Some(category) => format!("No commands found in category `{}`.", category),
        None => "No commands are registered.".to_owned(),
    }
}

pub fn page_out_of_range_message(requested: usize, total: usize) -> String {
    format!("Page {} doesn't exist; there are {} page(s).", requested, total)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::grouped_help_description;
    use crate::CommandMeta;

    const FIRST: CommandMeta = CommandMeta {
        name: "alpha",
        desc: "First command.",
        category: "fun",
        usage: "k!alpha",
    };
    const SECOND: CommandMeta = CommandMeta {
        name: "beta",
        desc: "Second command.",
        category: "fun",
        usage: "k!beta",
    };
    const THIRD: CommandMeta = CommandMeta {
        name: "gamma",
        desc: "Third command.",
        category: "utility",
        usage: "k!gamma",
    };

    #[test]
    fn groups_by_category_with_headers() {
        let rendered = grouped_help_description(&[&FIRST, &SECOND, &THIRD]);
        assert!(rendered.starts_with("**Fun**\n"));
        assert!(rendered.contains("`k!alpha` — First command.\n"));
        assert!(rendered.contains("\n**Utility**\n"));
        assert!(rendered.contains("`k!gamma` — Third command.\n"));
    }
}
