pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Result, WrapErr};
pub use colored::Colorize;

/// Table without borders, used for every key/value listing of the CLI
pub fn new_table() -> prettytable::Table {
    let mut table = prettytable::Table::new();
    table.set_format(
        prettytable::format::FormatBuilder::new()
            .padding(1, 1)
            .build(),
    );
    table
}

/// Print a `✓ message` confirmation line for write operations
pub fn print_success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green(), message.as_ref().bright_white());
}
