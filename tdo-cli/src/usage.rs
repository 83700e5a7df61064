use strum::IntoEnumIterator;
use tdo_core::args::ActionFlag;

/// The usage rows as a markdown table, for the help action.
pub fn usage_table() -> String {
    let mut md = String::from("**Usage:**\n\n|Flag|Arguments|Description|\n|-|-|-|\n");
    for flag in ActionFlag::iter() {
        let (params, description) = describe(flag);
        md.push_str(&format!(
            "|`tdo {}`|{}|{}|\n",
            flag.as_ref(),
            params,
            description
        ));
    }
    md
}

/// The usage rows as plain text, for stderr after a parse error.
pub fn plain_usage() -> String {
    let mut out = String::from("Usage:\n");
    for flag in ActionFlag::iter() {
        let (params, description) = describe(flag);
        let line = format!("  tdo {} {:<33} {}", flag.as_ref(), params, description);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn describe(flag: ActionFlag) -> (&'static str, &'static str) {
    match flag {
        ActionFlag::Help => ("", "Show this help"),
        ActionFlag::List => ("", "List todo items (default)"),
        ActionFlag::Add => ("<title> [description]", "Add a todo item"),
        ActionFlag::Update => ("<id> [-t title] [-d description]", "Update a todo item"),
        ActionFlag::Delete => ("<id>...", "Delete todo items by id"),
        ActionFlag::MarkComplete => ("<id>...", "Mark complete by id"),
        ActionFlag::MarkIncomplete => ("<id>...", "Mark incomplete by id"),
    }
}
