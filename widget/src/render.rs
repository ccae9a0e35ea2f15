//! Text rendering of the mounted widget.

use std::fmt::Write;

use todo_sync_core::{EntryState, ViewEntry};

/// Render the title followed by one numbered line per entry.
pub fn render(title: &str, entries: &[ViewEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(1)));
    if entries.is_empty() {
        out.push_str("  (nothing to do)\n");
    }
    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&render_entry(index + 1, entry));
        out.push('\n');
    }
    out
}

/// One line: number, checkbox, name and a marker for unconfirmed state.
pub fn render_entry(number: usize, entry: &ViewEntry) -> String {
    let check = if entry.item.done { 'x' } else { ' ' };
    let marker = match entry.state {
        EntryState::Confirmed => "",
        EntryState::Pending => "  (saving)",
        EntryState::Failed => "  (not saved)",
    };
    format!("{number:>3}. [{check}] {}{marker}", entry.item.name)
}

#[cfg(test)]
mod tests {
    use todo_sync_core::{TodoId, TodoItem};

    use super::*;

    fn entry(id: u64, name: &str, done: bool, state: EntryState) -> ViewEntry {
        ViewEntry {
            item: TodoItem {
                id: TodoId::Number(id),
                name: name.to_string(),
                owner: "alice".to_string(),
                done,
            },
            state,
        }
    }

    #[test]
    fn renders_one_open_item() {
        let out = render("Alice", &[entry(1, "buy milk", false, EntryState::Confirmed)]);
        assert_eq!(out, "Alice\n=====\n  1. [ ] buy milk\n");
    }

    #[test]
    fn marks_done_and_failed_entries() {
        let line = render_entry(2, &entry(2, "wash car", true, EntryState::Failed));
        assert_eq!(line, "  2. [x] wash car  (not saved)");
    }

    #[test]
    fn marks_in_flight_entry() {
        let line = render_entry(1, &entry(1, "buy milk", true, EntryState::Pending));
        assert_eq!(line, "  1. [x] buy milk  (saving)");
    }

    #[test]
    fn empty_list_has_placeholder() {
        let out = render("T", &[]);
        assert!(out.ends_with("(nothing to do)\n"));
    }
}
