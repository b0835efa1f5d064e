//! Calendar strings used to namespace log directories.

use chrono::{DateTime, Local, TimeZone};

const DAY_FORMAT: &str = "%Y-%m-%d";
const DAY_HOUR_FORMAT: &str = "%Y-%m-%d-%H";

/// Current local date as `YYYY-MM-DD`.
#[must_use]
pub fn today() -> String {
    day(&Local::now())
}

/// Current local date and hour as `YYYY-MM-DD-HH`.
#[must_use]
pub fn today_hour() -> String {
    day_hour(&Local::now())
}

#[must_use]
pub fn day<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DAY_FORMAT).to_string()
}

#[must_use]
pub fn day_hour<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DAY_HOUR_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_day_and_hour() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 41, 0).unwrap();
        assert_eq!(day(&at), "2024-03-07");
        assert_eq!(day_hour(&at), "2024-03-07-09");
    }

    #[test]
    fn today_has_fixed_width() {
        assert_eq!(today().len(), 10);
        assert_eq!(today_hour().len(), 13);
    }
}
