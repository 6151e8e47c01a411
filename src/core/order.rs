use std::cmp::Ordering;

use crate::entry::Entry;

/// Listing order with its tie-break chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Name, then expiration date.
    Name,
    /// Country, then name, then expiration date.
    Country,
    /// Style, then name, then expiration date.
    Style,
    /// Expiration date, then name.
    Expiration,
}

impl SortOrder {
    /// All orders in menu order.
    pub const ALL: [SortOrder; 4] = [Self::Name, Self::Country, Self::Style, Self::Expiration];

    /// Compares two entries in this order.
    pub fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name).then_with(|| a.expires.cmp(&b.expires)),
            Self::Country => a
                .country
                .cmp(&b.country)
                .then_with(|| Self::Name.compare(a, b)),
            Self::Style => a
                .style
                .cmp(&b.style)
                .then_with(|| Self::Name.compare(a, b)),
            Self::Expiration => a.expires.cmp(&b.expires).then_with(|| a.name.cmp(&b.name)),
        }
    }

    /// Maps a list-submenu choice (`1..=4`) to an order.
    pub fn from_menu(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Name),
            2 => Some(Self::Country),
            3 => Some(Self::Style),
            4 => Some(Self::Expiration),
            _ => None,
        }
    }

    /// Human-readable name of the sort key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Country => "country",
            Self::Style => "beer style",
            Self::Expiration => "expiration date",
        }
    }
}
