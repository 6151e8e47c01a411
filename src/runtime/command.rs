//! Top-level menu commands.

use crate::core::order::SortOrder;

/// A top-level menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Persist the inventory and end the session.
    Quit,
    /// Add bottles, creating the entry when its key is new.
    Add,
    /// Remove bottles from an existing entry.
    Remove,
    /// Show the inventory in a chosen order.
    List,
}

impl Command {
    /// Maps a top-level menu number to a command.
    pub fn from_menu(choice: u8) -> Option<Self> {
        match choice {
            0 => Some(Self::Quit),
            1 => Some(Self::Add),
            2 => Some(Self::Remove),
            3 => Some(Self::List),
            _ => None,
        }
    }
}

pub(crate) const MAIN_MENU: &str = "\nWhat do you want to do?\n\
0. Quit\n\
1. Add beer\n\
2. Remove beer\n\
3. Show beers";

pub(crate) fn list_menu() -> String {
    let mut menu = String::from("\nHow do you want the beers sorted?");
    for (idx, order) in SortOrder::ALL.iter().enumerate() {
        menu.push_str(&format!("\n{}. By {}", idx + 1, order.label()));
    }
    menu
}
