use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date written as `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
    }
}
