//! WiX utility functions.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// MSI product version derived from a build timestamp.
///
/// MSI versions are `major.minor.build` with each field limited to 255,
/// 255 and 65535 respectively (a fourth field is ignored by Windows
/// Installer), so the timestamp is packed as:
///
/// - `1.<year / 100>.<(year % 100) * 400 + day_of_year>.<hour * 60 + minute>`
///
/// Two builds within the same minute produce the same version.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wix_msi_builder::bundler::build_version;
///
/// let at = Utc.with_ymd_and_hms(2020, 10, 18, 12, 34, 56).unwrap();
/// assert_eq!(build_version(at), "1.20.8292.754");
/// ```
pub fn build_version(now: DateTime<Utc>) -> String {
    let year = now.year();
    format!(
        "1.{}.{}.{}",
        year / 100,
        year % 100 * 400 + now.ordinal() as i32,
        now.hour() * 60 + now.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn packs_start_of_year() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(build_version(at), "1.20.10401.0");
    }

    #[test]
    fn packs_end_of_leap_year() {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(build_version(at), "1.20.9966.1439");
    }

    #[test]
    fn later_minute_sorts_higher() {
        let a = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 10, 19, 8, 1, 0).unwrap();
        assert!(build_version(a) < build_version(b));
    }
}
