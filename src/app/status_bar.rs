// SPDX-License-Identifier: GPL-3.0-only

//! Status bar and lock screen clock text

use crate::constants::status_bar;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// `14:05`
pub fn time_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format(status_bar::TIME_FORMAT).to_string()
}

/// `Monday, January 6, 2025`
pub fn date_text<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format(status_bar::DATE_FORMAT).to_string()
}

/// Simulated battery level
pub fn battery_text() -> String {
    format!("{}%", status_bar::BATTERY_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_formats() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 9, 5, 0).unwrap();
        assert_eq!(time_text(&now), "09:05");
        assert_eq!(date_text(&now), "Monday, January 6, 2025");
        assert_eq!(battery_text(), "85%");
    }
}
