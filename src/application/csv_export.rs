//! CSV rendering of the admin signup listing.
//!
//! Every data field is quoted with internal quotes doubled, and line breaks
//! inside free text collapse to a single space so each record stays on one line.

use chrono::NaiveDate;

use crate::domain::entities::signup::SignupEntry;

pub const CSV_HEADERS: [&str; 9] = [
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Organization Name",
    "Organization Size",
    "Team Challenges",
    "Timestamp",
    "IP Address",
];

/// Render entries as CSV: a header row, then one row per entry in the given order.
pub fn signups_to_csv(entries: &[SignupEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for entry in entries {
        let timestamp = entry.timestamp_string();
        let fields = [
            entry.first_name.as_deref().unwrap_or_default(),
            entry.last_name.as_deref().unwrap_or_default(),
            entry.email.as_str(),
            entry.phone.as_deref().unwrap_or_default(),
            entry.organization_name.as_deref().unwrap_or_default(),
            entry.organization_size.as_deref().unwrap_or_default(),
            entry.team_challenges.as_deref().unwrap_or_default(),
            timestamp.as_str(),
            entry.ip.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote_field(f)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Download name for an export taken on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("celer-waitlist-{}.csv", date.format("%Y-%m-%d"))
}

fn quote_field(value: &str) -> String {
    let flattened = collapse_line_breaks(value);
    format!("\"{}\"", flattened.replace('"', "\"\""))
}

/// Replace each `\r\n`, `\n` or `\r` with one space.
fn collapse_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
