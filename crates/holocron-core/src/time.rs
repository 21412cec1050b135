use crate::error::{CoreError, Result};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Parses an upstream timestamp.
///
/// Accepts full RFC 3339 timestamps (`2014-12-20T10:57:57.586000Z`) and plain
/// calendar dates (`1977-05-25`), the latter pinned to midnight UTC.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime> {
    let value = value.trim();
    if let Ok(datetime) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(datetime);
    }

    let date = Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        CoreError::invalid_timestamp(format!("Failed to parse timestamp '{value}': {e}"))
    })?;
    Ok(date.midnight().assume_utc())
}

/// Formats a timestamp as RFC 3339.
pub fn format_timestamp(value: &OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_default()
}

pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
