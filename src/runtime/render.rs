use std::io::{self, Write};

use crate::{entry::Entry, types::format_date};

const RULE_WIDTH: usize = 119;

/// Writes a header, a dashed rule, and one row per entry.
pub fn write_table<W: Write>(out: &mut W, entries: &[&Entry]) -> io::Result<()> {
    writeln!(
        out,
        "{:<30} | {:<10} | {:<15} | {:>6} | {:>8} | {:>15} | {:>5}",
        "Name", "Country", "Beer style", "ABV", "Volume", "Expiration date", "Number of bottles"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for entry in entries {
        writeln!(out, "{}", row(entry))?;
    }
    Ok(())
}

fn row(entry: &Entry) -> String {
    format!(
        "{:<30} | {:<10} | {:<15} | {:>5}% | {:>5} cl | {:>15} | {:>5}",
        entry.name,
        entry.country,
        entry.style,
        format!("{:.1}", entry.abv),
        format!("{:.1}", entry.volume),
        format_date(entry.expires),
        entry.count
    )
}
