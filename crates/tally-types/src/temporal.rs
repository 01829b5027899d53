use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// ISO-8601 week equality over calendar dates.
///
/// Two dates are in the same week iff they share the calendar year and the
/// ISO week number (Monday-start weeks; week 1 is the week containing the
/// year's first Thursday).
///
/// The year check uses the ordinary calendar year, not the ISO week-year.
/// ISO numbering can place the first days of January in week 52/53 of the
/// previous week-year, and late-December days in week 1 of the next, so
/// adjacent-year boundary dates compare unequal even when their raw week
/// numbers coincide: 2024-12-30 and 2025-01-02 both carry "week 1" but sit
/// in different calendar years, hence not the same week.
pub trait SameWeek {
    fn in_same_week_as(&self, other: &Self) -> bool;
}

impl<T: Datelike> SameWeek for T {
    fn in_same_week_as(&self, other: &Self) -> bool {
        self.year() == other.year() && self.iso_week().week() == other.iso_week().week()
    }
}

/// Parse a datetime from either the full `2025-11-03T09:30:00` form or a
/// bare calendar date, which reads as midnight. A space separator is
/// accepted in place of the `T`.
pub fn parse_flexible(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
}

/// Serde adapter for [`parse_flexible`] on required datetime fields.
pub mod flexible {
    use serde::{Deserialize, Deserializer};

    use super::NaiveDateTime;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_flexible(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional datetime fields. Absent and empty values both
/// read as `None`.
pub mod flexible_opt {
    use serde::{Deserialize, Deserializer};

    use super::NaiveDateTime;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => super::parse_flexible(s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
