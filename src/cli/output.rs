//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::PlainEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a numbered table of entries (#, ID, Title, Username).
pub fn print_entries_table(entries: &[PlainEntry]) {
    if entries.is_empty() {
        info("No entries in this store yet.");
        tip("Run `squirrel add <TITLE>` to add your first entry.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "ID", "Title", "Username"]);

    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            e.id.to_string(),
            e.title.clone(),
            e.username.clone(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one entry.  The password is masked unless
/// `reveal` is set.
pub fn print_entry(entry: &PlainEntry, reveal: bool) {
    let password = if reveal || entry.password.is_empty() {
        entry.password.clone()
    } else {
        "*".repeat(8)
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID".to_string(), entry.id.to_string()]);
    table.add_row(vec!["Title".to_string(), entry.title.clone()]);
    table.add_row(vec!["Username".to_string(), entry.username.clone()]);
    table.add_row(vec!["Password".to_string(), password]);
    table.add_row(vec!["Address".to_string(), entry.address.clone()]);
    table.add_row(vec!["Notes".to_string(), entry.notes.clone()]);

    println!("{table}");
}
