//! Table rendering of the webhook state for `list`.

use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::constants::messages;
use crate::store::StateStore;

/// Render the store as a two-column `repo | enabled` table.
///
/// An empty store renders as the "no webhooks" message instead. With
/// `color` off the table is plain text even on a terminal.
pub fn render_table(store: &StateStore, color: bool) -> String {
    if store.is_empty() {
        return messages::NO_WEBHOOKS.to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if !color {
        table.force_no_tty();
    }

    table.set_header(vec![
        Cell::new("repo").fg(Color::Cyan),
        Cell::new("enabled").fg(Color::Cyan),
    ]);

    for (name, record) in store.iter() {
        let enabled_color = if record.enabled {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(record.enabled).fg(enabled_color),
        ]);
    }

    table.to_string()
}

/// Print the current state to stdout.
pub fn print_store(store: &StateStore) {
    println!("{}", render_table(store, true));
}
