//! Утилиты форматирования даты и времени биллинга
//!
//! Биллинг пишет время по центральному поясу (Chicago), но отдаёт его
//! с меткой UTC; агентам время показывается по восточному (New York).

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Пояс, в котором биллинг записывает время
pub const SOURCE_TZ: Tz = chrono_tz::America::Chicago;

/// Пояс отображения
pub const DISPLAY_TZ: Tz = chrono_tz::America::New_York;

/// `MMM D, YYYY hh:mm:ss a`, например "Jan 5, 2024 03:07:09 pm"
pub const BILLING_DATETIME_FORMAT: &str = "%b %-d, %Y %I:%M:%S %P";

/// Форматирует время биллинга для отображения
///
/// Для пустого или нераспознанного значения показывается текущее время.
/// Значения без смещения читаются как UTC, а не в локальном поясе
/// браузера.
/// Пример: "2024-01-15T10:00:00Z" -> "Jan 15, 2024 11:00:00 am"
pub fn format_billing_datetime(datetime_str: Option<&str>) -> String {
    let instant = datetime_str
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_instant)
        .map(reinterpret_in_source_zone)
        .unwrap_or_else(Utc::now);

    instant
        .with_timezone(&DISPLAY_TZ)
        .format(BILLING_DATETIME_FORMAT)
        .to_string()
}

/// Перечитывает время UTC как время по Chicago
fn reinterpret_in_source_zone(instant: DateTime<Utc>) -> DateTime<Utc> {
    let offset = SOURCE_TZ
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    instant - Duration::seconds(i64::from(offset))
}

/// Значения без смещения считаются UTC
fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_is_now_in_display_zone(formatted: &str) {
        let parsed = NaiveDateTime::parse_from_str(formatted, BILLING_DATETIME_FORMAT)
            .unwrap_or_else(|e| panic!("'{}' does not match the display format: {}", formatted, e));
        let now = Utc::now().with_timezone(&DISPLAY_TZ).naive_local();
        let drift = (now - parsed).num_seconds().abs();
        assert!(drift <= 5, "'{}' is {}s away from now", formatted, drift);
    }

    #[test]
    fn test_format_winter_timestamp() {
        assert_eq!(
            format_billing_datetime(Some("2024-01-15T10:00:00Z")),
            "Jan 15, 2024 11:00:00 am"
        );
    }

    #[test]
    fn test_format_summer_timestamp() {
        assert_eq!(
            format_billing_datetime(Some("2024-07-04T20:30:15.000Z")),
            "Jul 4, 2024 09:30:15 pm"
        );
    }

    #[test]
    fn test_offsetless_and_date_only_inputs() {
        assert_eq!(
            format_billing_datetime(Some("2023-11-20 08:05:09")),
            "Nov 20, 2023 09:05:09 am"
        );
        assert_eq!(
            format_billing_datetime(Some("2023-03-01")),
            "Mar 1, 2023 01:00:00 am"
        );
    }

    #[test]
    fn test_missing_input_formats_now() {
        assert_is_now_in_display_zone(&format_billing_datetime(None));
        assert_is_now_in_display_zone(&format_billing_datetime(Some("")));
    }

    #[test]
    fn test_invalid_input_formats_now() {
        assert_is_now_in_display_zone(&format_billing_datetime(Some("not a date")));
    }
}
