use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Formats an ISO date for the bills list, e.g. `2004-04-04` becomes `4 Avr. 04`.
///
/// Dates that do not parse are returned unchanged so that a corrupted record still shows up.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => format!(
            "{} {}. {:02}",
            d.day(),
            MONTHS[d.month0() as usize],
            d.year().rem_euclid(100)
        ),
        Err(_) => date.to_string(),
    }
}
