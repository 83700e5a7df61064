use tdo_core::TodoItem;
use termimad::MadSkin;

/// Terminal output, markdown-rendered through a `MadSkin`.
pub struct Renderer {
    skin: MadSkin,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        let skin = if use_color {
            MadSkin::default()
        } else {
            MadSkin::no_style()
        };
        Self { skin }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    /// Renders the list as a table: id, title, description, done, created.
    pub fn print_todos(&self, todos: &[TodoItem]) {
        if todos.is_empty() {
            self.print_md("No todos yet. Add one with `tdo -a <title> [description]`.\n");
            return;
        }
        let mut md = String::new();
        md.push_str("|ID|Title|Description|Done|Created|\n");
        md.push_str("|-|-|-|-|-|\n");
        for todo in todos {
            let done = if todo.is_done { "x" } else { " " };
            md.push_str(&format!(
                "|{}|{}|{}|{}|{}|\n",
                todo.id,
                escape_cell(&todo.title),
                escape_cell(&todo.description),
                done,
                todo.created_at.format("%Y-%m-%d %I:%M %p"),
            ));
        }
        self.skin.print_text(&md);
    }
}

/// Keeps multi-line and pipe-bearing values on one table row.
fn escape_cell(text: &str) -> String {
    text.replace(['\n', '\r'], " ").replace('|', "\\|")
}
